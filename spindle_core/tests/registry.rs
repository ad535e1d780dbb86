use spindle_config::load_toml;
use spindle_core::{ProtocolRegistry, SpindleError};
use spindle_traits::VfdProtocol;

#[test]
fn builds_the_builtin_model() {
    let registry = ProtocolRegistry::with_builtin();
    let cfg = load_toml("[drive]\nmodel = \"BD600\"\n").expect("parse TOML");
    let mut drive = registry.build(&cfg).expect("BD600 is registered");
    assert_eq!(drive.model(), "BD600");
    // The boxed driver is immediately usable through the trait.
    assert!(drive.initialization_sequence(-1).is_some());
}

#[test]
fn unknown_model_is_a_typed_error() {
    let registry = ProtocolRegistry::with_builtin();
    let cfg = load_toml("[drive]\nmodel = \"HY02D223B\"\n").expect("parse TOML");
    let err = registry.build(&cfg).expect_err("unregistered model");
    match err.downcast_ref::<SpindleError>() {
        Some(SpindleError::UnknownModel(name)) => assert_eq!(name, "HY02D223B"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_config_is_rejected_before_lookup() {
    let registry = ProtocolRegistry::with_builtin();
    let cfg = load_toml("[drive]\nmodel = \"BD600\"\nbaud = 1200\n").expect("parse TOML");
    let err = registry.build(&cfg).expect_err("bad baud");
    assert!(format!("{err:#}").contains("drive configuration"));
}

#[test]
fn model_names_are_sorted_and_stable() {
    let registry = ProtocolRegistry::with_builtin();
    assert_eq!(registry.model_names(), vec!["BD600"]);
}
