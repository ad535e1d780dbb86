use rstest::rstest;
use spindle_core::Bd600;
use spindle_traits::{SpindleState, VfdProtocol};

fn encoded_value(msg: &[u8; 16]) -> u16 {
    u16::from_be_bytes([msg[4], msg[5]])
}

#[rstest]
#[case(SpindleState::Clockwise, 0x01)]
#[case(SpindleState::CounterClockwise, 0x02)]
#[case(SpindleState::Disabled, 0x05)]
#[case(SpindleState::Unknown, 0x05)]
fn direction_codes(#[case] state: SpindleState, #[case] code: u8) {
    let mut drive = Bd600::new();
    let cmd = drive.direction_command(state);
    assert_eq!(&cmd.msg[..6], &[0x00, 0x06, 0x10, 0x00, 0x00, code]);
    assert_eq!(cmd.tx_length, 6);
    assert_eq!(cmd.rx_length, 6);
}

#[test]
fn half_of_maximum_encodes_as_5000() {
    // Power-on ceiling is 400.00 Hz.
    let mut drive = Bd600::new();
    let sc = drive.set_speed_command(20_000);
    assert!(sc.in_range);
    assert_eq!(&sc.command.msg[..6], &[0x00, 0x06, 0x30, 0x00, 0x13, 0x88]);
}

#[test]
fn zero_speed_is_never_flagged() {
    let mut drive = Bd600::new();
    let sc = drive.set_speed_command(0);
    assert!(sc.in_range);
    assert_eq!(encoded_value(&sc.command.msg), 0);
}

#[test]
fn over_range_speed_still_builds_a_command() {
    let mut drive = Bd600::new();
    let sc = drive.set_speed_command(50_000);
    assert!(!sc.in_range);
    // 125.00% of maximum goes out as computed, not clamped to full scale.
    assert_eq!(encoded_value(&sc.command.msg), 12_500);
}

#[test]
fn under_range_speed_warns_but_encodes() {
    let mut drive = Bd600::new();
    // Raise the floor to 100.00 Hz through the init path.
    let step = drive.initialization_sequence(-2).expect("floor step");
    assert!(drive.parse_response(
        step.parser.expect("parser"),
        &[0x01, 0x01, 0x03, 0x00, 0x27, 0x10]
    ));
    let sc = drive.set_speed_command(500);
    assert!(!sc.in_range);
    assert_eq!(encoded_value(&sc.command.msg), 125);
}
