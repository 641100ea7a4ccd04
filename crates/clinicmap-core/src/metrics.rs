//! Outcome metrics as published upstream.
//!
//! Values arrive as display strings (`"1,234"`, `"42.5%"`, `"N/A"`) and are
//! kept that way; [`parse_metric_number`] is the single numeric view.

use serde::{Deserialize, Serialize};

/// One published figure alongside the national figure it is compared to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub national_average: Option<String>,
}

impl Metric {
    /// Numeric value, `None` for `"N/A"`, blank or non-numeric strings.
    #[must_use]
    pub fn numeric(&self) -> Option<f64> {
        self.value.as_deref().and_then(parse_metric_number)
    }

    /// Value minus national average, when both are numeric.
    #[must_use]
    pub fn delta_from_national(&self) -> Option<f64> {
        let national = self.national_average.as_deref().and_then(parse_metric_number)?;
        Some(self.numeric()? - national)
    }
}

/// Success rate for one patient age bracket (e.g. `"under 35"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRate {
    pub age_bracket: String,
    #[serde(flatten)]
    pub rate: Metric,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicMetrics {
    /// Annual treatment cycles performed.
    #[serde(default)]
    pub volume: Metric,
    #[serde(default)]
    pub success_rates: Vec<SuccessRate>,
}

/// Parses a published figure, stripping thousands separators and a trailing
/// percent sign. `"N/A"` and anything non-numeric yield `None`.
#[must_use]
pub fn parse_metric_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("n/a") {
        return None;
    }
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
