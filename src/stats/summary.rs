use serde::{Deserialize, Serialize};

/// Presentation options for [`NumStat::summary`](crate::stats::NumStat::summary).
///
/// Passed explicitly per call; `None` fields fall back to plain `f64`
/// formatting and the accumulator's own integer hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryFormat {
    /// Decimal places for mean, deviation and extrema.
    #[serde(default)]
    pub precision: Option<usize>,
    /// Overrides the accumulator's integer hint for extrema.
    #[serde(default)]
    pub integer: Option<bool>,
}

impl SummaryFormat {
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
            integer: None,
        }
    }

    pub(crate) fn value(&self, v: f64) -> String {
        match self.precision {
            Some(p) => format!("{v:.p$}"),
            None => format!("{v}"),
        }
    }

    pub(crate) fn extremum(&self, v: f64, integer_hint: bool) -> String {
        if self.integer.unwrap_or(integer_hint) && v.is_finite() {
            format!("{v:.0}")
        } else {
            self.value(v)
        }
    }
}

/// `*n` suffix for a multiplicity other than one.
pub(crate) fn multiplicity(n: f64) -> String {
    if n == 1.0 {
        String::new()
    } else {
        format!("*{n:.0}")
    }
}
