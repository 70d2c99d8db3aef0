use serde::Serialize;

/// Annual turnover above which GST registration is required.
pub const DEFAULT_GST_THRESHOLD: f64 = 4_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GstStatus {
    Required,
    NotMandatory,
}

impl std::fmt::Display for GstStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "GST registration required"),
            Self::NotMandatory => write!(f, "GST registration not mandatory"),
        }
    }
}

/// Registration is required only strictly above the threshold.
pub fn check_gst_compliance(revenue: f64, threshold: Option<f64>) -> GstStatus {
    let threshold = threshold.unwrap_or(DEFAULT_GST_THRESHOLD);
    if revenue > threshold {
        GstStatus::Required
    } else {
        GstStatus::NotMandatory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(check_gst_compliance(3_999_999.0, None), GstStatus::NotMandatory);
        assert_eq!(check_gst_compliance(4_000_000.0, None), GstStatus::NotMandatory);
        assert_eq!(check_gst_compliance(4_000_001.0, None), GstStatus::Required);
    }

    #[test]
    fn custom_threshold() {
        assert_eq!(check_gst_compliance(2_000_001.0, Some(2_000_000.0)), GstStatus::Required);
        assert_eq!(GstStatus::Required.to_string(), "GST registration required");
    }
}
