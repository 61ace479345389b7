//! Link source: packets in, commands and acknowledgments out

use horologe_core::source::link::MAX_BYTES_PER_POLL;
use horologe_core::{InputSource, LinkConfig, LinkSource};
use horologe_protocol::{Command, CommandKind, LinkState};

use crate::mock_hw::{MockClock, MockUart};

fn link() -> (LinkSource<MockUart, MockClock>, MockClock) {
    let clock = MockClock::new();
    let source = LinkSource::new(MockUart::default(), clock.clone(), &LinkConfig::default());
    (source, clock)
}

/// Queue bytes on the UART and poll until they are consumed
fn deliver(source: &mut LinkSource<MockUart, MockClock>, bytes: &[u8]) -> Vec<Command> {
    source.uart_mut().receive(bytes);

    let mut commands = Vec::new();
    for _ in 0..=bytes.len() {
        if let Some(cmd) = source.poll_once() {
            commands.push(cmd);
        }
    }
    commands
}

#[test]
fn brightness_packet_yields_command_and_ok_ack() {
    let (mut source, _clock) = link();

    let commands = deliver(&mut source, b"*B123~");

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].kind, CommandKind::SetBrightness);
    assert_eq!(commands[0].data, 123);
    assert_eq!(source.uart_mut().take_tx(), b"*Z0~");
}

#[test]
fn invalid_adjust_sub_code_is_rejected() {
    let (mut source, _clock) = link();

    let commands = deliver(&mut source, b"*V2~");

    assert!(commands.is_empty());
    assert_eq!(source.uart_mut().take_tx(), b"*Z3~");
    assert!(source.engine().is_idle());
}

#[test]
fn unknown_command_acks_bad_command() {
    let (mut source, _clock) = link();

    assert!(deliver(&mut source, b"*K~").is_empty());
    assert_eq!(source.uart_mut().take_tx(), b"*Z2~");
}

#[test]
fn identical_packets_are_independent() {
    let (mut source, _clock) = link();

    let commands = deliver(&mut source, b"*L~*L~");

    assert_eq!(commands, vec![Command::lamp_test(), Command::lamp_test()]);
    assert_eq!(source.uart_mut().take_tx(), b"*Z0~*Z0~");
}

#[test]
fn stalled_packet_times_out() {
    let (mut source, clock) = link();

    // Nearly complete, terminator never arrives
    assert!(deliver(&mut source, b"*T08304").is_empty());
    assert_eq!(source.engine().state(), LinkState::Data);

    clock.advance(999);
    assert_eq!(source.poll_once(), None);
    assert!(source.uart_mut().take_tx().is_empty());

    clock.advance(1);
    assert_eq!(source.poll_once(), None);
    assert_eq!(source.uart_mut().take_tx(), b"*Z1~");
    assert!(source.engine().is_idle());

    // Late bytes of the dead packet are not resurrected
    assert!(deliver(&mut source, b"5~").is_empty());
    assert!(source.uart_mut().take_tx().is_empty());
}

#[test]
fn poll_is_bounded_and_stops_at_first_command() {
    let (mut source, _clock) = link();
    source.uart_mut().receive(b"*X~*Y~");

    assert_eq!(source.poll_once(), Some(Command::enter_setup()));
    assert_eq!(source.uart_mut().rx.len(), 3);
    assert_eq!(source.poll_once(), Some(Command::reset()));

    // Noise longer than one poll's budget is consumed over several polls
    let noise = vec![b'.'; MAX_BYTES_PER_POLL + 4];
    source.uart_mut().receive(&noise);
    assert_eq!(source.poll_once(), None);
    assert_eq!(source.uart_mut().rx.len(), 4);
}

#[test]
fn restart_mid_packet_reports_sequence_error() {
    let (mut source, _clock) = link();

    let commands = deliver(&mut source, b"*B12*S0~");

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].kind, CommandKind::Select);
    assert_eq!(source.uart_mut().take_tx(), b"*Z4~*Z0~");
}
