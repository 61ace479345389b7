//! UART serial communication abstractions
//!
//! The intake loop never waits for bytes: receive is a non-blocking
//! "give me a byte if one is there" call. Transmit may block, since the
//! only traffic is short acknowledgments and provisioning lines.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Take one received byte, if any is waiting
    ///
    /// Returns `Ok(None)` immediately when the receive buffer is empty.
    fn try_read(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Combined UART interface
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// Adapter exposing any `embedded-io` serial port as a [`Uart`]
///
/// Receive uses [`embedded_io::ReadReady`] to avoid blocking when no
/// data is pending.
#[derive(Debug)]
pub struct IoUart<T>(pub T);

impl<T> IoUart<T> {
    /// Wrap a serial port
    pub fn new(port: T) -> Self {
        Self(port)
    }

    /// Release the wrapped port
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: embedded_io::Write> UartTx for IoUart<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_io::Write::write_all(&mut self.0, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        embedded_io::Write::flush(&mut self.0)
    }
}

impl<T: embedded_io::Read + embedded_io::ReadReady> UartRx for IoUart<T> {
    type Error = T::Error;

    fn try_read(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.0.read_ready()? {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        match self.0.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}
