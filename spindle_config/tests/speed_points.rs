use spindle_config::{SpeedPoint, load_toml};

#[test]
fn parses_tuple_form() {
    let toml = r#"
[drive]
model = "BD600"

[speeds]
points = [[7200, 10000], [24000, 40000]]
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid table should pass");
    assert_eq!(
        cfg.speeds.points,
        vec![
            SpeedPoint {
                rpm: 7200,
                centihz: 10000
            },
            SpeedPoint {
                rpm: 24000,
                centihz: 40000
            },
        ]
    );
}

#[test]
fn parses_table_form() {
    let toml = r#"
[drive]
model = "BD600"

[[speeds.points]]
rpm = 7200
centihz = 10000

[[speeds.points]]
rpm = 24000
centihz = 40000
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid table should pass");
    assert_eq!(cfg.speeds.points.len(), 2);
    assert_eq!(cfg.speeds.points[1].rpm, 24000);
}

#[test]
fn rejects_single_point_table() {
    let toml = r#"
[drive]
model = "BD600"

[speeds]
points = [[7200, 10000]]
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("one point cannot interpolate");
    assert!(format!("{err}").contains("at least two entries"));
}

#[test]
fn rejects_non_monotonic_rpm() {
    let toml = r#"
[drive]
model = "BD600"

[speeds]
points = [[7200, 10000], [7200, 40000]]
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("duplicate rpm should be rejected");
    assert!(format!("{err}").contains("strictly increasing"));
}

#[test]
fn rejects_zero_frequency_point() {
    let toml = r#"
[drive]
model = "BD600"

[speeds]
points = [[0, 0], [24000, 40000]]
"#;
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("zero centihz should be rejected");
    assert!(format!("{err}").contains("centihz must be > 0"));
}
