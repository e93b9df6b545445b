use serde::{Deserialize, Serialize};
use std::fmt;

/// Toggles controlling which dimension/measure combinations are permitted.
///
/// Both flags default to `true`, the most permissive policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFlags {
    /// Whether measure selection is permitted at all.
    #[serde(default = "crate::serde_defaults::default_true")]
    pub can_select_measure: bool,
    /// Whether one column may be a dimension and a measure at the same time.
    #[serde(default = "crate::serde_defaults::default_true")]
    pub can_use_field_as_both_dimension_and_measure: bool,
}

impl PolicyFlags {
    pub fn new(can_select_measure: bool, can_use_field_as_both_dimension_and_measure: bool) -> Self {
        Self {
            can_select_measure,
            can_use_field_as_both_dimension_and_measure,
        }
    }

    pub fn measure_area(&self) -> MeasureArea {
        if self.can_select_measure {
            MeasureArea::Aggregated
        } else {
            MeasureArea::PlainColumns
        }
    }
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// How the measure drop target behaves under a given policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureArea {
    /// Dropped columns get an aggregation picked by the user.
    Aggregated,
    /// Measure selection is off; the target behaves like the dimension list.
    PlainColumns,
}

impl MeasureArea {
    pub fn label(&self) -> &'static str {
        match self {
            MeasureArea::Aggregated => "aggregated",
            MeasureArea::PlainColumns => "plain columns",
        }
    }
}

impl fmt::Display for MeasureArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_area_follows_measure_selection() {
        assert_eq!(PolicyFlags::new(true, false).measure_area(), MeasureArea::Aggregated);
        assert_eq!(PolicyFlags::new(false, true).measure_area(), MeasureArea::PlainColumns);
        assert_eq!(MeasureArea::PlainColumns.to_string(), "plain columns");
    }

    #[test]
    fn flags_deserialize_with_permissive_defaults() {
        let flags: PolicyFlags = serde_json::from_str(r#"{"canSelectMeasure": false}"#).unwrap();
        assert_eq!(flags, PolicyFlags::new(false, true));
    }
}
