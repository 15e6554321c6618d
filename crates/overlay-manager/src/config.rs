//! Tooltip configuration: timing, spacing and overlay styling hooks

use page_tooltips_shared::{TooltipError, TooltipResult};
use serde::{Deserialize, Serialize};

/// Longest delay accepted for either timer
pub const MAX_DELAY_MS: u32 = 60_000;

/// Runtime configuration for the overlay manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Hover delay used when an element has no valid delay annotation
    pub default_delay_ms: u32,
    /// Settle window before a hide request takes visible effect
    pub hide_delay_ms: u32,
    /// Distance between the anchor point and the overlay edge
    pub gap_px: f64,
    /// Escape hides a shown or pending tooltip
    pub dismiss_on_escape: bool,
    /// CSS class given to the overlay element
    pub overlay_class: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: 500,
            hide_delay_ms: 100,
            gap_px: 8.0,
            dismiss_on_escape: true,
            overlay_class: "tooltip-overlay".to_string(),
        }
    }
}

impl TooltipConfig {
    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> TooltipResult<Self> {
        let config: TooltipConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> TooltipResult<()> {
        Self::validate_delay("default_delay_ms", self.default_delay_ms)?;
        Self::validate_delay("hide_delay_ms", self.hide_delay_ms)?;

        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(TooltipError::InvalidConfig {
                message: format!("Invalid gap_px: {}. Must be a finite value >= 0", self.gap_px),
                field: Some("gap_px".to_string()),
            });
        }

        if self.overlay_class.trim().is_empty() {
            return Err(TooltipError::InvalidConfig {
                message: "overlay_class must not be empty".to_string(),
                field: Some("overlay_class".to_string()),
            });
        }

        Ok(())
    }

    fn validate_delay(field: &str, value: u32) -> TooltipResult<()> {
        if value > MAX_DELAY_MS {
            return Err(TooltipError::InvalidConfig {
                message: format!("Invalid {field}: {value}. Must be at most {MAX_DELAY_MS}ms"),
                field: Some(field.to_string()),
            });
        }
        Ok(())
    }
}
