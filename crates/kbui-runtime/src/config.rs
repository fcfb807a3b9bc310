#![forbid(unsafe_code)]

//! Adapter configuration.
//!
//! Captures every reserved identifier, marker class and timing constant as a
//! single [`AdapterConfig`] that can be loaded from JSON at page start-up.
//!
//! # Loading
//!
//! ```json
//! { "mobile_breakpoint_px": 768, "notification_visible_ms": 5000 }
//! ```
//!
//! ```rust,ignore
//! let config = AdapterConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the value the server-rendered templates and the
//! stylesheet expect, so `AdapterConfig::default()` needs no markup changes.

use core::time::Duration;

use kbui_i18n::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved identifiers, markers and timings for the presentation adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    // Navigation panel
    /// Id of the collapsible side panel.
    pub sidebar_id: String,
    /// Id of the overlay shown behind the open panel.
    pub overlay_id: String,
    /// Class marking navigation items inside the panel.
    pub nav_item_class: String,
    /// Marker for the open panel.
    pub sidebar_open_class: String,
    /// Marker for the active overlay.
    pub overlay_active_class: String,
    /// Viewports at most this wide collapse the panel after navigation.
    pub mobile_breakpoint_px: f64,

    // Alerts
    /// Class marking alerts that dismiss themselves.
    pub alert_class: String,
    /// Delay before an alert starts fading.
    pub alert_dismiss_delay_ms: u64,
    /// Fade length before the alert leaves the layout.
    pub alert_fade_ms: u64,

    // Tooltips
    /// Attribute holding tooltip text.
    pub tooltip_attribute: String,
    /// Reserved id of the live tooltip.
    pub tooltip_id: String,
    /// Class of the floating tooltip element.
    pub tooltip_class: String,
    /// Gap between the tooltip's bottom edge and the anchor's top edge.
    pub tooltip_gap_px: f64,

    // Notifications
    /// Base class of toast elements.
    pub notification_class: String,
    /// Marker for a visible toast.
    pub notification_show_class: String,
    /// Delay between insertion and the show marker.
    pub notification_enter_delay_ms: u64,
    /// Time from creation until the show marker is removed.
    pub notification_visible_ms: u64,
    /// Fade-out length before the toast is removed.
    pub notification_exit_ms: u64,
    /// Kind used when the caller names none.
    pub default_notification_kind: String,

    // Formatting
    /// Currency used when the caller names none.
    pub default_currency: String,
    /// Offset applied to instants before taking their calendar date.
    pub utc_offset_minutes: i32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            sidebar_id: "appSidebar".into(),
            overlay_id: "sidebarOverlay".into(),
            nav_item_class: "sidebar__nav-item".into(),
            sidebar_open_class: "sidebar--open".into(),
            overlay_active_class: "sidebar-overlay--active".into(),
            mobile_breakpoint_px: 1024.0,
            alert_class: "alert--dismissible".into(),
            alert_dismiss_delay_ms: 5000,
            alert_fade_ms: 300,
            tooltip_attribute: "data-tooltip".into(),
            tooltip_id: "activeTooltip".into(),
            tooltip_class: "tooltip".into(),
            tooltip_gap_px: 8.0,
            notification_class: "notification".into(),
            notification_show_class: "notification--show".into(),
            notification_enter_delay_ms: 10,
            notification_visible_ms: 3000,
            notification_exit_ms: 300,
            default_notification_kind: "info".into(),
            default_currency: "MXN".into(),
            utc_offset_minutes: 0,
        }
    }
}

impl AdapterConfig {
    /// Load from a JSON string without validating.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON string and reject invalid values.
    pub fn load_json(s: &str) -> Result<Self, ConfigError> {
        let config = Self::from_json_str(s)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let names = [
            ("sidebar_id", &self.sidebar_id),
            ("overlay_id", &self.overlay_id),
            ("nav_item_class", &self.nav_item_class),
            ("sidebar_open_class", &self.sidebar_open_class),
            ("overlay_active_class", &self.overlay_active_class),
            ("alert_class", &self.alert_class),
            ("tooltip_attribute", &self.tooltip_attribute),
            ("tooltip_id", &self.tooltip_id),
            ("tooltip_class", &self.tooltip_class),
            ("notification_class", &self.notification_class),
            ("notification_show_class", &self.notification_show_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                errors.push(format!("{field} must not be empty"));
            } else if value.chars().any(char::is_whitespace) {
                errors.push(format!("{field} must be a single token, got {value:?}"));
            }
        }

        if !self.mobile_breakpoint_px.is_finite() || self.mobile_breakpoint_px <= 0.0 {
            errors.push(format!(
                "mobile_breakpoint_px must be > 0, got {}",
                self.mobile_breakpoint_px
            ));
        }
        if !self.tooltip_gap_px.is_finite() {
            errors.push(format!(
                "tooltip_gap_px must be finite, got {}",
                self.tooltip_gap_px
            ));
        }
        if let Err(err) = Currency::from_code(&self.default_currency) {
            errors.push(format!("default_currency: {err}"));
        }
        if self.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            errors.push(format!(
                "utc_offset_minutes must be within one day, got {}",
                self.utc_offset_minutes
            ));
        }

        errors
    }

    pub fn alert_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_delay_ms)
    }

    pub fn alert_fade(&self) -> Duration {
        Duration::from_millis(self.alert_fade_ms)
    }

    pub fn notification_enter_delay(&self) -> Duration {
        Duration::from_millis(self.notification_enter_delay_ms)
    }

    pub fn notification_visible(&self) -> Duration {
        Duration::from_millis(self.notification_visible_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    /// Compact JSON, one line.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Errors that can occur when loading an adapter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_page_conventions() {
        let c = AdapterConfig::default();
        assert_eq!(c.sidebar_id, "appSidebar");
        assert_eq!(c.overlay_id, "sidebarOverlay");
        assert_eq!(c.mobile_breakpoint_px, 1024.0);
        assert_eq!(c.alert_dismiss_delay(), Duration::from_millis(5000));
        assert_eq!(c.alert_fade(), Duration::from_millis(300));
        assert_eq!(c.tooltip_gap_px, 8.0);
        assert_eq!(c.notification_enter_delay(), Duration::from_millis(10));
        assert_eq!(c.notification_visible(), Duration::from_millis(3000));
        assert_eq!(c.notification_exit(), Duration::from_millis(300));
        assert!(c.validate().is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = AdapterConfig::from_json_str(r#"{"mobile_breakpoint_px": 768}"#).unwrap();
        assert_eq!(c.mobile_breakpoint_px, 768.0);
        assert_eq!(c.sidebar_id, "appSidebar");
        assert_eq!(c.default_currency, "MXN");
    }

    #[test]
    fn json_round_trip() {
        let original = AdapterConfig {
            utc_offset_minutes: -360,
            ..AdapterConfig::default()
        };
        let back = AdapterConfig::from_json_str(&original.to_json()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AdapterConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn validation_collects_every_problem() {
        let json = r#"{
            "sidebar_id": "",
            "tooltip_class": "tool tip",
            "mobile_breakpoint_px": 0,
            "default_currency": "PESO",
            "utc_offset_minutes": 1440
        }"#;
        let err = AdapterConfig::load_json(json).unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors[0].contains("sidebar_id"));
        assert!(errors[1].contains("tooltip_class"));
    }

    #[test]
    fn fade_longer_than_visible_time_is_allowed() {
        let c = AdapterConfig::load_json(
            r#"{"notification_visible_ms": 300, "notification_exit_ms": 500}"#,
        )
        .unwrap();
        assert_eq!(c.notification_exit(), Duration::from_millis(500));
    }

    #[test]
    fn unknown_default_currency_is_rejected_at_load() {
        let err = AdapterConfig::load_json(r#"{"default_currency": "XYZ"}"#).unwrap_err();
        let ConfigError::Validation(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(errors, vec!["default_currency: unknown currency code: XYZ".to_owned()]);
        assert!(AdapterConfig::load_json(r#"{"default_currency": "usd"}"#).is_ok());
    }

    #[test]
    fn load_json_accepts_valid_config() {
        let c = AdapterConfig::load_json(r#"{"utc_offset_minutes": -360}"#).unwrap();
        assert_eq!(c.utc_offset_minutes, -360);
    }
}
