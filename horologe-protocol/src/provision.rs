//! Wireless module provisioning
//!
//! Before the packet protocol runs, the serial module is configured with a
//! short list of plain-text AT directives. Each line is
//! `"AT+" + directive [+ device name] + line ending`; the device name is
//! appended to the first directive only, which is always the name directive.
//!
//! Every directive except the last gets a reply line from the module. The
//! last one is normally a reset, after which the module says nothing useful.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prefix of every provisioning line
pub const AT_PREFIX: &str = "AT+";

/// Longest assembled provisioning line
pub const MAX_LINE_LEN: usize = 40;

/// Longest device name the module accepts
pub const MAX_NAME_LEN: usize = 16;

/// Reply bytes kept per directive
pub const MAX_REPLY_LEN: usize = 16;

/// Time allowed for the module to answer one directive
pub const RESPONSE_TIMEOUT_MS: u32 = 500;

/// Errors assembling a provisioning line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProvisionError {
    /// Assembled line exceeds [`MAX_LINE_LEN`]
    LineTooLong,
}

/// Supported serial Bluetooth modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModuleProfile {
    /// HC-05 (needs its setup pin pulsed by board code first)
    Hc05,
    /// HC-06
    #[default]
    Hc06,
    /// HM-10 with JNHuaMao HMSoft firmware (no line ending)
    Hm10HmSoft,
    /// HM-10 clones with CRLF line ending
    Hm10Other,
}

impl ModuleProfile {
    /// Directives in send order; the name directive is always first
    pub const fn directives(self) -> &'static [&'static str] {
        match self {
            ModuleProfile::Hc05 => &["NAME=", "PSWD=1234", "ROLE=0", "CLASS=800500", "RESET"],
            ModuleProfile::Hc06 => &["NAME", "PIN1234"],
            ModuleProfile::Hm10HmSoft | ModuleProfile::Hm10Other => {
                &["NAME", "PIN123456", "TYPE0", "ROLE0", "RESET"]
            }
        }
    }

    /// Line ending the module expects
    pub const fn line_ending(self) -> &'static str {
        match self {
            ModuleProfile::Hm10HmSoft => "",
            _ => "\r\n",
        }
    }

    /// Iterate the provisioning lines for this module
    pub fn lines(self, name: &str) -> Provisioning<'_> {
        Provisioning {
            profile: self,
            name,
            index: 0,
        }
    }
}

/// One assembled provisioning line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Complete line, ready to write
    pub line: String<MAX_LINE_LEN>,
    /// Whether the module will answer this line
    pub awaits_reply: bool,
}

/// Assemble a single provisioning line into a fixed-capacity buffer
pub fn directive_line(
    directive: &str,
    name: Option<&str>,
    line_ending: &str,
) -> Result<String<MAX_LINE_LEN>, ProvisionError> {
    let mut line = String::new();
    for part in [AT_PREFIX, directive, name.unwrap_or(""), line_ending] {
        line.push_str(part)
            .map_err(|_| ProvisionError::LineTooLong)?;
    }
    Ok(line)
}

/// Iterator over a module's provisioning lines
#[derive(Debug, Clone)]
pub struct Provisioning<'a> {
    profile: ModuleProfile,
    name: &'a str,
    index: usize,
}

impl Iterator for Provisioning<'_> {
    type Item = Result<Directive, ProvisionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let directives = self.profile.directives();
        let directive = *directives.get(self.index)?;
        let name = (self.index == 0).then_some(self.name);

        self.index += 1;
        let awaits_reply = self.index < directives.len();

        Some(
            directive_line(directive, name, self.profile.line_ending())
                .map(|line| Directive { line, awaits_reply }),
        )
    }
}

/// Collects one reply line from the module
#[derive(Debug, Clone, Default)]
pub struct ReplyLine {
    buffer: String<MAX_REPLY_LEN>,
    complete: bool,
}

impl ReplyLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a received byte; returns true once the line is complete
    ///
    /// A line completes at `'\n'` or when the buffer is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.complete {
            return true;
        }

        // Non-ASCII noise is replaced so the reply stays printable
        let ch = if byte.is_ascii() { byte as char } else { '?' };
        let _ = self.buffer.push(ch);

        self.complete = byte == b'\n' || self.buffer.len() == MAX_REPLY_LEN;
        self.complete
    }

    /// True when nothing has been received
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Reply text with the line ending stripped
    pub fn as_str(&self) -> &str {
        self.buffer.as_str().trim_end()
    }
}
