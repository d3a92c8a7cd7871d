//! Parameter blocks stored as YAML.
//!
//! Durations are written as integers in the unit of their field so a file
//! reads like the device settings:
//!
//! ```yaml
//! alarm_min: 15
//! reset_press_ms: 200
//! hard_reset_hold_s: 6
//! hard_reset_release_s: 2
//! hard_reset_press_ms: 200
//! channel1: reset
//! channel2: power
//! reset_limit: 10
//! channel3: off
//! temp_threshold: 80
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use watchdog_protocol::codec::field_max;
use watchdog_protocol::{LineMode, Params, RelayMode};

use crate::error::{Result, WatchdogError};

/// File form of [`Params`]. Missing keys are zero / `off`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamsFile {
    pub alarm_min: u64,
    pub reset_press_ms: u64,
    pub hard_reset_hold_s: u64,
    pub hard_reset_release_s: u64,
    pub hard_reset_press_ms: u64,
    pub channel1: RelayMode,
    pub channel2: RelayMode,
    pub reset_limit: u8,
    pub channel3: LineMode,
    pub temp_threshold: u8,
}

impl ParamsFile {
    /// Parse and validate a YAML parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Params> {
        let path = path.as_ref();
        let config_error = |reason: String| WatchdogError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let file: ParamsFile = serde_yaml::from_str(&text).map_err(|e| config_error(e.to_string()))?;
        Params::try_from(file).map_err(|e| config_error(e.to_string()))
    }

    /// Render a parameter block as YAML.
    pub fn to_yaml(params: &Params) -> Result<String> {
        Ok(serde_yaml::to_string(&ParamsFile::from(params))?)
    }
}

/// Check that `value` is a whole number of `step`s and fits a one-digit field.
fn checked_steps(field: &'static str, value: u64, step: u64) -> Result<u64> {
    let max = u64::from(field_max(1)) * step;
    if value > max {
        return Err(WatchdogError::InvalidParam {
            field,
            reason: format!("{value} exceeds {max}"),
        });
    }
    if value % step != 0 {
        return Err(WatchdogError::InvalidParam {
            field,
            reason: format!("{value} is not a multiple of {step}"),
        });
    }
    Ok(value)
}

impl TryFrom<ParamsFile> for Params {
    type Error = WatchdogError;

    /// Rejects any value the parameter block cannot store exactly.
    fn try_from(file: ParamsFile) -> Result<Self> {
        let alarm_min = checked_steps("alarm_min", file.alarm_min, 1)?;
        let reset_limit = checked_steps("reset_limit", u64::from(file.reset_limit), 1)?;

        Ok(Params {
            alarm: Duration::from_secs(alarm_min * 60),
            reset_press: Duration::from_millis(checked_steps("reset_press_ms", file.reset_press_ms, 100)?),
            hard_reset_hold: Duration::from_secs(checked_steps("hard_reset_hold_s", file.hard_reset_hold_s, 1)?),
            hard_reset_release: Duration::from_secs(checked_steps(
                "hard_reset_release_s",
                file.hard_reset_release_s,
                1,
            )?),
            hard_reset_press: Duration::from_millis(checked_steps(
                "hard_reset_press_ms",
                file.hard_reset_press_ms,
                100,
            )?),
            channel1: file.channel1,
            channel2: file.channel2,
            reset_limit: reset_limit as u8,
            channel3: file.channel3,
            temp_threshold: file.temp_threshold,
        })
    }
}

impl From<&Params> for ParamsFile {
    fn from(params: &Params) -> Self {
        ParamsFile {
            alarm_min: params.alarm.as_secs() / 60,
            reset_press_ms: params.reset_press.as_millis() as u64,
            hard_reset_hold_s: params.hard_reset_hold.as_secs(),
            hard_reset_release_s: params.hard_reset_release.as_secs(),
            hard_reset_press_ms: params.hard_reset_press.as_millis() as u64,
            channel1: params.channel1,
            channel2: params.channel2,
            reset_limit: params.reset_limit,
            channel3: params.channel3,
            temp_threshold: params.temp_threshold,
        }
    }
}
