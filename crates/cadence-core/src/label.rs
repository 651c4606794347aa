//! Label normalization and issue classification.

/// Labels with reporting significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLabel {
    /// The item is blocked; drives blocked-time accounting.
    Blocked,
    Bug,
    TechDebt,
    Feature,
    /// Any label outside the known set.
    Other,
}

impl IssueLabel {
    /// Normalize a raw label string (case-insensitive, total).
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "BLOCKED" => Self::Blocked,
            "BUG" => Self::Bug,
            "TECH DEBT" => Self::TechDebt,
            "FEATURE" => Self::Feature,
            _ => Self::Other,
        }
    }
}

/// Issue classification derived from its label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Reported work-item type.
    pub type_name: &'static str,
    /// True when a `Feature` label is present.
    pub is_feature: bool,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            type_name: "Enhancement",
            is_feature: false,
        }
    }
}

/// Classify an issue from its labels.
///
/// `Bug` and `Tech Debt` set the type (a later label wins); `Feature` sets
/// the feature flag; anything unrecognized leaves the default
/// "Enhancement" type.
#[must_use]
pub fn classify(labels: &[String]) -> Classification {
    let mut class = Classification::default();
    let mut type_name = None;
    for label in labels {
        match IssueLabel::from_raw(label) {
            IssueLabel::Bug => type_name = Some("Bug"),
            IssueLabel::TechDebt => type_name = Some("Tech Debt"),
            IssueLabel::Feature => class.is_feature = true,
            IssueLabel::Blocked | IssueLabel::Other => {}
        }
    }
    if let Some(name) = type_name {
        class.type_name = name;
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn from_raw_is_case_insensitive() {
        assert_eq!(IssueLabel::from_raw("blocked"), IssueLabel::Blocked);
        assert_eq!(IssueLabel::from_raw("BLOCKED"), IssueLabel::Blocked);
        assert_eq!(IssueLabel::from_raw("Tech Debt"), IssueLabel::TechDebt);
        assert_eq!(IssueLabel::from_raw("enhancement"), IssueLabel::Other);
    }

    #[test]
    fn classify_defaults_to_enhancement() {
        let class = classify(&labels(&["help wanted"]));
        assert_eq!(class.type_name, "Enhancement");
        assert!(!class.is_feature);
    }

    #[test]
    fn classify_bug_and_feature() {
        let class = classify(&labels(&["bug", "feature"]));
        assert_eq!(class.type_name, "Bug");
        assert!(class.is_feature);
    }

    #[test]
    fn classify_later_type_label_wins() {
        let class = classify(&labels(&["bug", "tech debt"]));
        assert_eq!(class.type_name, "Tech Debt");
    }

    #[test]
    fn classify_feature_alone_keeps_default_type() {
        let class = classify(&labels(&["Feature"]));
        assert_eq!(class.type_name, "Enhancement");
        assert!(class.is_feature);
    }
}
