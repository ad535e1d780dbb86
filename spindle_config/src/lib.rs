#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the spindle drive stack.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The optional speed table accepts tuple or table entry forms.
//! - Bus settings (unit id, baud) are validated here for the host transport;
//!   the protocol core itself never reads them.
use serde::Deserialize;
use serde::de::Deserializer;

/// One discrete point of a configured speed table.
///
/// `rpm` is the spindle speed the operator asks for; `centihz` is the drive
/// frequency that produces it (2500 = 25.00 Hz).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpeedPoint {
    pub rpm: u32,
    pub centihz: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Drive {
    /// Registered drive model name, e.g. "BD600".
    pub model: String,
    /// Modbus RTU unit address on the bus (1..=247).
    pub modbus_unit: u8,
    /// Serial baud rate; must match the rate programmed into the drive.
    pub baud: u32,
}

impl Default for Drive {
    fn default() -> Self {
        Self {
            model: "BD600".to_string(),
            modbus_unit: 1,
            baud: 9600,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Speeds {
    /// Optional custom speed table. Accepts either:
    /// - array of tuples: [[7200, 10000], [24000, 40000]]
    /// - array of tables: [{ rpm = 7200, centihz = 10000 }, ...]
    ///
    /// When present, this table overrides the calibration-derived default
    /// and is never recomputed from device registers.
    #[serde(default, deserialize_with = "de_speed_points")]
    pub points: Vec<SpeedPoint>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub drive: Drive,
    #[serde(default)]
    pub speeds: Speeds,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointToml {
    Tuple((u32, u32)),
    Table { rpm: u32, centihz: u32 },
}

fn de_speed_points<'de, D>(deserializer: D) -> Result<Vec<SpeedPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<Vec<PointToml>> = Option::deserialize(deserializer)?;
    let mut out = Vec::new();
    if let Some(items) = opt {
        for p in items {
            match p {
                PointToml::Tuple((rpm, centihz)) => out.push(SpeedPoint { rpm, centihz }),
                PointToml::Table { rpm, centihz } => out.push(SpeedPoint { rpm, centihz }),
            }
        }
    }
    Ok(out)
}

const KNOWN_BAUD: [u32; 4] = [4_800, 9_600, 19_200, 38_400];

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Drive
        if self.drive.model.trim().is_empty() {
            eyre::bail!("drive.model must not be empty");
        }
        if self.drive.modbus_unit == 0 || self.drive.modbus_unit > 247 {
            eyre::bail!("drive.modbus_unit must be in 1..=247");
        }
        if !KNOWN_BAUD.contains(&self.drive.baud) {
            eyre::bail!(
                "drive.baud must be one of 4800, 9600, 19200, 38400 (got {})",
                self.drive.baud
            );
        }

        // Speeds: a usable table needs at least two points, strictly
        // increasing in both axes, with no zero frequency.
        if !self.speeds.points.is_empty() {
            if self.speeds.points.len() < 2 {
                eyre::bail!("speeds.points needs at least two entries");
            }
            for (i, p) in self.speeds.points.iter().enumerate() {
                if p.centihz == 0 {
                    eyre::bail!("speeds.points[{i}].centihz must be > 0");
                }
            }
            for i in 1..self.speeds.points.len() {
                let (prev, cur) = (self.speeds.points[i - 1], self.speeds.points[i]);
                if cur.rpm <= prev.rpm {
                    eyre::bail!("speeds.points rpm values must be strictly increasing");
                }
                if cur.centihz <= prev.centihz {
                    eyre::bail!("speeds.points centihz values must be strictly increasing");
                }
            }
        }

        // Logging
        if let Some(level) = &self.logging.level {
            const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
            if !LEVELS.contains(&level.as_str()) {
                eyre::bail!("logging.level must be one of trace, debug, info, warn, error");
            }
        }
        if let Some(rot) = &self.logging.rotation {
            const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];
            if !ROTATIONS.contains(&rot.as_str()) {
                eyre::bail!("logging.rotation must be one of never, daily, hourly");
            }
        }

        Ok(())
    }
}
