//! Trading session settings.

use serde::{Deserialize, Serialize};

/// Regular trading session, in whole hours of a fixed UTC offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketHoursConfig {
    /// First open hour (inclusive).
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    /// Close hour (exclusive).
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    /// Session offset from UTC in hours.
    #[serde(default)]
    pub utc_offset_hours: i32,
}

impl Default for MarketHoursConfig {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            utc_offset_hours: 0,
        }
    }
}

const fn default_open_hour() -> u32 {
    9
}

const fn default_close_hour() -> u32 {
    16
}
