//! Workflow display names

use crate::shared::constants::sentinel::DATASET_LABEL;

const TEST_WORKFLOW_PREFIX: &str = "Test workflow: ";

/// Abbreviate a workflow name for display
///
/// Absent names fall back to the dataset label. Variant suffixes such as
/// `(paired)` or `- hg19` are cut off.
pub fn workflow_display_name(raw: Option<&str>) -> String {
    let mut name = raw.unwrap_or(DATASET_LABEL);
    name = name.strip_prefix(TEST_WORKFLOW_PREFIX).unwrap_or(name);

    for marker in ['(', '-'] {
        if let Some(idx) = name.find(marker) {
            if idx > 0 {
                name = &name[..idx];
            }
        }
    }
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_name_is_dataset() {
        assert_eq!(workflow_display_name(None), "dataset");
    }

    #[test]
    fn test_prefix_and_variants_stripped() {
        assert_eq!(
            workflow_display_name(Some("Test workflow: bwa (paired) - hg19")),
            "bwa"
        );
        assert_eq!(workflow_display_name(Some("FastQC - quality")), "FastQC");
    }

    #[test]
    fn test_leading_marker_kept() {
        assert_eq!(workflow_display_name(Some("-x")), "-x");
    }
}
