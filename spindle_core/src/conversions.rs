//! `From` implementations bridging `spindle_config` types to `spindle_core`
//! types.

use crate::speeds::SpeedPoint;

// ── SpeedPoint ───────────────────────────────────────────────────────────────

impl From<&spindle_config::SpeedPoint> for SpeedPoint {
    fn from(p: &spindle_config::SpeedPoint) -> Self {
        Self {
            rpm: p.rpm,
            freq_centihz: p.centihz,
        }
    }
}

impl From<spindle_config::SpeedPoint> for SpeedPoint {
    fn from(p: spindle_config::SpeedPoint) -> Self {
        Self::from(&p)
    }
}
