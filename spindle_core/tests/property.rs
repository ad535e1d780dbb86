use proptest::prelude::*;
use spindle_core::{Bd600, frame};
use spindle_traits::VfdProtocol;

proptest! {
    #[test]
    fn in_range_speeds_encode_at_most_full_scale(freq in 0u32..=40_000) {
        let mut drive = Bd600::new();
        let sc = drive.set_speed_command(freq);
        let encoded = u16::from_be_bytes([sc.command.msg[4], sc.command.msg[5]]);
        prop_assert!(encoded <= 10_000);
        prop_assert_eq!(sc.in_range, freq == 0 || (100..=40_000).contains(&freq));
    }

    #[test]
    fn implausible_pole_bytes_never_mutate(byte in proptest::num::u8::ANY) {
        let mut drive = Bd600::new();
        let step = drive.initialization_sequence(-4).expect("pole step");
        let ok = drive.parse_response(
            step.parser.expect("parser"),
            &[0x01, 0x01, 0x03, 0x00, byte],
        );
        let plausible = (2..=4).contains(&byte);
        prop_assert_eq!(ok, plausible);
        let expected = if plausible { u16::from(byte) } else { 4 };
        prop_assert_eq!(drive.calibration().pole_count(), expected);
    }

    #[test]
    fn read_requests_always_have_the_fixed_shape(reg in proptest::num::u8::ANY) {
        for cmd in [frame::read_setting(reg), frame::read_status(reg)] {
            prop_assert_eq!(cmd.tx_length, 6);
            prop_assert_eq!(cmd.rx_length, 6);
            prop_assert_eq!(cmd.msg[0], 0);
            prop_assert_eq!(cmd.msg[2], 0x03);
            prop_assert_eq!(cmd.msg[3], reg);
            prop_assert_eq!(cmd.msg[4], 0);
            prop_assert_eq!(cmd.msg[5], 0);
        }
    }

    #[test]
    fn write_requests_round_trip_their_fields(
        addr in proptest::num::u16::ANY,
        value in proptest::num::u16::ANY,
    ) {
        let cmd = frame::write_single(addr, value);
        prop_assert_eq!(cmd.msg[1], 0x06);
        prop_assert_eq!(u16::from_be_bytes([cmd.msg[2], cmd.msg[3]]), addr);
        prop_assert_eq!(u16::from_be_bytes([cmd.msg[4], cmd.msg[5]]), value);
    }
}
