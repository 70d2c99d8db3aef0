use serde::Deserialize;

use crate::error::ConfigError;
use crate::normalize::ColumnRoles;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Scoring thresholds. Immutable for the duration of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Margin (%) above which the top margin tier applies.
    pub profit_margin_high: f64,
    /// Margin (%) above which the middle margin tier applies.
    pub profit_margin_medium: f64,
    /// Margin (%) below which "Low profit margin" is reported.
    pub profit_margin_low_risk: f64,
    /// Expenses above `revenue * expense_ratio_risk` are flagged.
    pub expense_ratio_risk: f64,
    /// Upper clamp for the health score.
    pub health_score_max: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            profit_margin_high: 15.0,
            profit_margin_medium: 5.0,
            profit_margin_low_risk: 5.0,
            expense_ratio_risk: 0.85,
            health_score_max: 100.0,
        }
    }
}

impl AnalysisConfig {
    pub const KEYS: [&'static str; 5] = [
        "profit_margin_high",
        "profit_margin_medium",
        "profit_margin_low_risk",
        "expense_ratio_risk",
        "health_score_max",
    ];

    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "profit_margin_high" => Some(&mut self.profit_margin_high),
            "profit_margin_medium" => Some(&mut self.profit_margin_medium),
            "profit_margin_low_risk" => Some(&mut self.profit_margin_low_risk),
            "expense_ratio_risk" => Some(&mut self.expense_ratio_risk),
            "health_score_max" => Some(&mut self.health_score_max),
            _ => None,
        }
    }

    /// Apply a `key=value` override.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::BadOverride(assignment.to_string()))?;
        let (key, value) = (key.trim(), value.trim());
        let parsed: f64 = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        let mut next = *self;
        let slot = next
            .slot(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        *slot = parsed;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Every threshold must be finite; the score ceiling must not be negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.profit_margin_high,
            self.profit_margin_medium,
            self.profit_margin_low_risk,
            self.expense_ratio_risk,
            self.health_score_max,
        ];
        for (key, value) in Self::KEYS.iter().zip(values) {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        if self.health_score_max < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "health_score_max".into(),
                value: self.health_score_max.to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Settings file
// ---------------------------------------------------------------------------

/// Contents of an analysis settings file:
///
/// ```toml
/// [thresholds]
/// profit_margin_high = 20.0
///
/// [columns]
/// amount = ["amount", "betrag"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub thresholds: AnalysisConfig,
    pub columns: ColumnRoles,
}

impl Settings {
    /// Parse a (possibly partial) settings document. Missing keys keep defaults.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.thresholds.validate()?;
        log::debug!("loaded settings: {settings:?}");
        Ok(settings)
    }
}
