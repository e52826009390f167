//! Label derivation.

use crate::export::BugRecord;
use tracing::warn;

/// Label added to every imported issue.
pub const ORIGIN_LABEL: &str = "Bugzilla";

/// Normalizes free text into a label name usable as a URL path segment.
///
/// Every character outside ASCII `[A-Za-z0-9_ ]` is removed, then spaces
/// become underscores. Underscores are kept so that normalizing a label
/// twice gives the same label.
#[must_use]
pub fn normalize_label(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Derives the labels for a bug: the origin label, then its normalized
/// component and severity.
///
/// A component or severity that normalizes to nothing is skipped.
#[must_use]
pub fn derive_labels(bug: &BugRecord) -> Vec<String> {
    let mut labels = vec![ORIGIN_LABEL.to_string()];

    for (field, value) in [("component", &bug.component), ("severity", &bug.severity)] {
        let label = normalize_label(value);
        if label.is_empty() {
            warn!(bug_id = %bug.id, field, value = %value, "Label is empty after normalization, skipping");
            continue;
        }
        labels.push(label);
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_bug;

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_label("UI/Widgets!"), "UIWidgets");
        assert_eq!(normalize_label("C++ (core)"), "C_core");
    }

    #[test]
    fn replaces_spaces() {
        assert_eq!(normalize_label("Build System"), "Build_System");
        assert_eq!(normalize_label(" a  b "), "_a__b_");
    }

    #[test]
    fn removes_non_ascii() {
        assert_eq!(normalize_label("Übersetzung 2"), "bersetzung_2");
        assert_eq!(normalize_label("tab\there"), "tabhere");
    }

    #[test]
    fn keeps_underscores() {
        assert_eq!(normalize_label("Build_System"), "Build_System");
        assert_eq!(normalize_label("a_b c-d"), "a_b_cd");
    }

    #[test]
    fn normalization_is_idempotent() {
        for text in ["UI/Widgets!", "Build System", "a_b c-d", "", "ñ ñ", "100% done"] {
            let once = normalize_label(text);
            assert_eq!(normalize_label(&once), once);
            assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn derives_origin_component_and_severity() {
        let bug = sample_bug("42", "Crash on save");
        assert_eq!(derive_labels(&bug), ["Bugzilla", "UIWidgets", "critical"]);
    }

    #[test]
    fn skips_labels_that_normalize_to_nothing() {
        let mut bug = sample_bug("42", "Crash on save");
        bug.component = "???".to_string();
        assert_eq!(derive_labels(&bug), ["Bugzilla", "critical"]);
    }
}
