//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Default spacing between candidate start times, in minutes.
pub const DEFAULT_STEP_MINUTES: u32 = 30;

/// Tunables for the availability computation.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use slot_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"step_minutes": 15}"#).unwrap();
/// assert_eq!(config.step_minutes, 15);
/// assert!(config.include_cancelled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Spacing between candidate start times. Independent of service duration.
    pub step_minutes: u32,
    /// When `true`, cancelled and no-show appointments still block their slot.
    pub include_cancelled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_minutes: DEFAULT_STEP_MINUTES,
            include_cancelled: true,
        }
    }
}

impl EngineConfig {
    pub fn with_step_minutes(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_include_cancelled(mut self, include_cancelled: bool) -> Self {
        self.include_cancelled = include_cancelled;
        self
    }

    /// # Errors
    /// Returns `SlotError::InvalidConfig` if `step_minutes` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes == 0 {
            return Err(SlotError::InvalidConfig(
                "step_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
