//! Link provisioning: AT directives out, replies (or silence) back

use horologe_core::source::link::ProvisionReport;
use horologe_core::{InputSource, LinkConfig, LinkSource};
use horologe_protocol::{Command, FaceMode, ModuleProfile};

use crate::mock_hw::{MockClock, MockUart};

fn source_for(module: ModuleProfile, uart: MockUart) -> LinkSource<MockUart, MockClock> {
    let config = LinkConfig {
        module,
        ..LinkConfig::default()
    };
    LinkSource::new(uart, MockClock::ticking(1), &config)
}

#[test]
fn hc06_directives_with_replies() {
    let mut uart = MockUart::default();
    uart.replies.push_back(b"OKsetname\r\n");
    let mut source = source_for(ModuleProfile::Hc06, uart);

    let report = source.provision();

    assert_eq!(
        report,
        ProvisionReport {
            sent: 2,
            unanswered: 0,
            failed: 0
        }
    );
    assert_eq!(
        source.uart_mut().take_tx(),
        b"AT+NAMEHorologe\r\nAT+PIN1234\r\n"
    );
}

#[test]
fn silent_module_is_not_fatal() {
    let mut source = source_for(ModuleProfile::Hc05, MockUart::default());

    let report = source.provision();

    // Every directive is still sent; the final RESET is never waited on
    assert_eq!(report.sent, 5);
    assert_eq!(report.unanswered, 4);
    let tx = source.uart_mut().take_tx();
    assert!(tx.starts_with(b"AT+NAME=Horologe\r\nAT+PSWD=1234\r\n"));
    assert!(tx.ends_with(b"AT+CLASS=800500\r\nAT+RESET\r\n"));
}

#[test]
fn hmsoft_lines_have_no_terminator() {
    let mut source = source_for(ModuleProfile::Hm10HmSoft, MockUart::default());
    source.provision();

    let tx = source.uart_mut().take_tx();
    assert_eq!(tx, b"AT+NAMEHorologeAT+PIN123456AT+TYPE0AT+ROLE0AT+RESET");
}

#[test]
fn packets_accepted_after_init() {
    let mut uart = MockUart::default();
    uart.replies.push_back(b"OK\n");
    let mut source = source_for(ModuleProfile::Hc06, uart);

    source.init();
    source.uart_mut().take_tx();

    source.uart_mut().receive(b"*C9~");
    let cmd = (0..4).find_map(|_| source.poll_once());

    assert_eq!(cmd, Some(Command::clock_face(FaceMode::Cycle)));
    assert_eq!(source.uart_mut().take_tx(), b"*Z0~");
}
