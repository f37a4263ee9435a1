use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u64 = 1;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, CosmicConfigEntry)]
pub struct ChimeConfig {
    pub debug_logging: bool,
    pub twelve_hour_clock: bool,
}

impl ChimeConfig {
    /// Strftime pattern for stamps and reminder instants in the list.
    pub fn time_format(&self) -> &'static str {
        if self.twelve_hour_clock {
            "%Y-%m-%d %I:%M %p"
        } else {
            "%Y-%m-%d %H:%M"
        }
    }
}
