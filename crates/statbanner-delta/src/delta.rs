//! Delta calculator.
//!
//! Rules, first match wins:
//! 1. no previous value → `Unknown`, blank text
//! 2. equal → `None`, `(+/- 0.0%)`
//! 3. non-finite input, negative previous, or a drop below a zero baseline → `Unknown`
//! 4. zero previous, positive current → `New`, `(New)`
//! 5. otherwise percent change with one decimal and explicit sign

use serde::{Deserialize, Serialize};

pub const NO_CHANGE_TEXT: &str = "(+/- 0.0%)";
pub const NEW_TEXT: &str = "(New)";

/// How a value moved relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    None,
    Increase,
    Decrease,
    New,
    Unknown,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
            Self::New => write!(f, "new"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A classified, display-ready change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaResult {
    #[serde(rename = "displayText")]
    pub display_text: String,
    pub classification: Classification,
}

impl DeltaResult {
    pub fn unknown() -> Self {
        Self {
            display_text: String::new(),
            classification: Classification::Unknown,
        }
    }

    fn with(text: impl Into<String>, classification: Classification) -> Self {
        Self {
            display_text: text.into(),
            classification,
        }
    }
}

/// Classify the change from `previous` to `current`.
pub fn compute_delta(current: f64, previous: Option<f64>) -> DeltaResult {
    let Some(previous) = previous else {
        return DeltaResult::unknown();
    };

    if current == previous {
        return DeltaResult::with(NO_CHANGE_TEXT, Classification::None);
    }

    if !current.is_finite() || !previous.is_finite() || previous < 0.0 {
        return DeltaResult::unknown();
    }

    if previous == 0.0 {
        return if current > 0.0 {
            DeltaResult::with(NEW_TEXT, Classification::New)
        } else {
            DeltaResult::unknown()
        };
    }

    let change = (current - previous) / previous * 100.0;
    let classification = if change > 0.0 {
        Classification::Increase
    } else {
        Classification::Decrease
    };
    DeltaResult::with(format!("{:+.1}%", change), classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_previous_is_unknown() {
        for current in [0.0, 1.0, 150.0, 1e9] {
            let d = compute_delta(current, None);
            assert_eq!(d.classification, Classification::Unknown);
            assert_eq!(d.display_text, "");
        }
    }

    #[test]
    fn test_equal_values() {
        for v in [0.0, 1.0, 42.5, 1_000_000.0] {
            let d = compute_delta(v, Some(v));
            assert_eq!(d.classification, Classification::None);
            assert_eq!(d.display_text, "(+/- 0.0%)");
        }
    }

    #[test]
    fn test_equal_negative_or_infinite_is_no_change() {
        for v in [-5.0, f64::INFINITY, f64::NEG_INFINITY] {
            let d = compute_delta(v, Some(v));
            assert_eq!(d.classification, Classification::None);
            assert_eq!(d.display_text, "(+/- 0.0%)");
        }
        // NaN never equals itself
        assert_eq!(compute_delta(f64::NAN, Some(f64::NAN)), DeltaResult::unknown());
    }

    #[test]
    fn test_new_from_zero() {
        let d = compute_delta(5.0, Some(0.0));
        assert_eq!(d.classification, Classification::New);
        assert_eq!(d.display_text, "(New)");
    }

    #[test]
    fn test_increase() {
        let d = compute_delta(150.0, Some(100.0));
        assert_eq!(d.classification, Classification::Increase);
        assert_eq!(d.display_text, "+50.0%");
    }

    #[test]
    fn test_decrease() {
        let d = compute_delta(150.0, Some(200.0));
        assert_eq!(d.classification, Classification::Decrease);
        assert_eq!(d.display_text, "-25.0%");
    }

    #[test]
    fn test_one_decimal_place() {
        assert_eq!(compute_delta(1123.0, Some(1000.0)).display_text, "+12.3%");
        assert_eq!(compute_delta(96.0, Some(100.0)).display_text, "-4.0%");
        assert_eq!(compute_delta(2.0, Some(3.0)).display_text, "-33.3%");
    }

    #[test]
    fn test_drop_to_zero() {
        let d = compute_delta(0.0, Some(40.0));
        assert_eq!(d.classification, Classification::Decrease);
        assert_eq!(d.display_text, "-100.0%");
    }

    #[test]
    fn test_negative_previous_is_unknown() {
        let d = compute_delta(10.0, Some(-5.0));
        assert_eq!(d, DeltaResult::unknown());
    }

    #[test]
    fn test_negative_current_from_zero_is_unknown() {
        assert_eq!(compute_delta(-1.0, Some(0.0)), DeltaResult::unknown());
    }

    #[test]
    fn test_non_finite_is_unknown() {
        assert_eq!(compute_delta(f64::NAN, Some(1.0)), DeltaResult::unknown());
        assert_eq!(compute_delta(1.0, Some(f64::INFINITY)), DeltaResult::unknown());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(compute_delta(150.0, Some(100.0))).unwrap();
        assert_eq!(json["displayText"], "+50.0%");
        assert_eq!(json["classification"], "INCREASE");
    }
}
