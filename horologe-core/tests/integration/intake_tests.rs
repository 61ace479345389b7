//! Whole intake layer: three sources, one queue, one consumer

use horologe_core::{CommandQueue, Intake, LinkConfig, LinkSource, RemoteSource, SwitchSource};
use horologe_hal::KeyPress;
use horologe_protocol::{AdjustDirection, Command, SelectDirection};

use crate::mock_hw::{MockClock, MockIr, MockSwitch, MockUart};

type TestIntake = Intake<
    LinkSource<MockUart, MockClock>,
    RemoteSource<MockIr>,
    SwitchSource<MockSwitch>,
>;

const KEY_PLUS: u32 = 0xFF906F;
const KEY_EQ: u32 = 0xFFE01F;
const KEY_2: u32 = 0xFF18E7;
const KEY_5: u32 = 0xFF38C7;

fn intake(link_rx: &[u8], ir: &[u32], presses: &[KeyPress]) -> TestIntake {
    let mut uart = MockUart::default();
    uart.receive(link_rx);
    let link = LinkSource::new(uart, MockClock::ticking(1), &LinkConfig::default());

    let remote = RemoteSource::new(MockIr {
        codes: ir.iter().copied().collect(),
        started: false,
    });
    let switch = SwitchSource::new(MockSwitch {
        presses: presses.iter().copied().collect(),
    });

    Intake::new(Some(link), Some(remote), Some(switch))
}

#[test]
fn sources_interleave_in_poll_order() {
    let mut intake = intake(b"*B200~", &[KEY_PLUS], &[KeyPress::LongPress]);
    let mut queue: CommandQueue = CommandQueue::new();

    assert_eq!(intake.poll(&mut queue), 3);

    assert_eq!(queue.try_pop(), Some(Command::brightness(200)));
    assert_eq!(queue.try_pop(), Some(Command::adjust(AdjustDirection::Up)));
    assert_eq!(queue.try_pop(), Some(Command::select(SelectDirection::Next)));
    assert_eq!(queue.try_pop(), None);
}

#[test]
fn remote_digits_need_several_polls() {
    let mut intake = intake(b"", &[KEY_2, KEY_5, KEY_EQ], &[]);
    let mut queue: CommandQueue = CommandQueue::new();

    let queued: usize = (0..3).map(|_| intake.poll(&mut queue)).sum();

    assert_eq!(queued, 1);
    assert_eq!(queue.try_pop(), Some(Command::brightness(25)));
}

#[test]
fn overflow_drops_newest_and_keeps_running() {
    let presses = [KeyPress::Press; 3];
    let mut intake = intake(b"*L~*Y~*X~", &[KEY_PLUS, KEY_PLUS], &presses);
    let mut queue: CommandQueue = CommandQueue::new();

    intake.poll(&mut queue); // L, +, press
    intake.poll(&mut queue); // Y queued, + and press dropped
    assert_eq!(queue.len(), 4);
    assert_eq!(intake.dropped(), 2);

    // Consumer catches up, intake carries on
    assert_eq!(queue.try_pop(), Some(Command::lamp_test()));
    intake.poll(&mut queue); // X queued, press dropped
    assert_eq!(intake.dropped(), 3);

    let rest: Vec<_> = std::iter::from_fn(|| queue.try_pop()).collect();
    assert_eq!(
        rest,
        vec![
            Command::adjust(AdjustDirection::Up),
            Command::adjust(AdjustDirection::Up),
            Command::reset(),
            Command::enter_setup(),
        ]
    );
}

#[test]
fn init_reaches_every_source() {
    let mut intake = intake(b"", &[], &[]);
    intake.init();

    assert!(intake.remote().unwrap().receiver().started);
    assert!(intake.link().unwrap().engine().is_idle());
}
