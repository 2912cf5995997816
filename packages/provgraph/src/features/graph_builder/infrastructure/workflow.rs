//! Workflow payload repair
//!
//! Analyses carry their workflow definition as a Python-repr-like string.
//! A fixed chain of textual substitutions turns it into JSON. The chain only
//! targets the known serializer quirks; anything it cannot fix surfaces as a
//! parse error for the analysis.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ProvGraphError, Result};
use crate::shared::models::WorkflowData;

struct Substitution {
    pattern: Lazy<Regex>,
    replacement: &'static str,
}

macro_rules! substitution {
    ($pattern:expr, $replacement:expr) => {
        Substitution {
            pattern: Lazy::new(|| Regex::new($pattern).expect("static regex")),
            replacement: $replacement,
        }
    };
}

/// Applied in order
static REPAIR_CHAIN: [Substitution; 12] = [
    substitution!(r"u'", "\""),
    substitution!(r"'", "\""),
    substitution!(r"\sNone", " \"None\""),
    substitution!(r"\\n", ""),
    substitution!(r"\\", ""),
    substitution!(r#""\{""#, "{\""),
    substitution!(r#"\}""#, "}"),
    substitution!(r#"""(\S+)"""#, "\"$1\""),
    // internal __xxx__ parameters
    substitution!(r#""__(\S*)__":\s\d*(,\s)?"#, ""),
    substitution!(r",\snull", ""),
    substitution!(r"null,", ""),
    substitution!(r",\s\}", "}"),
];

/// Run the substitution chain over a raw workflow payload
pub fn repair_workflow_payload(raw: &str) -> String {
    REPAIR_CHAIN.iter().fold(raw.to_string(), |text, step| {
        step.pattern
            .replace_all(&text, step.replacement)
            .into_owned()
    })
}

/// Repair and parse the payload of one analysis
pub fn parse_workflow(analysis_uuid: &str, raw: &str) -> Result<WorkflowData> {
    let repaired = repair_workflow_payload(raw);
    let definition: serde_json::Value = serde_json::from_str(&repaired)
        .map_err(|e| ProvGraphError::parse_error(analysis_uuid, e))?;
    Ok(WorkflowData::from_definition(definition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_python_repr_quotes() {
        let repaired = repair_workflow_payload("{u'name': u'Test workflow: bwa (paired)'}");
        assert_eq!(repaired, r#"{"name": "Test workflow: bwa (paired)"}"#);
    }

    #[test]
    fn test_none_becomes_string() {
        let repaired = repair_workflow_payload("{'annotation': None}");
        assert_eq!(repaired, r#"{"annotation": "None"}"#);
    }

    #[test]
    fn test_internal_parameters_removed() {
        let repaired = repair_workflow_payload("{'__page__': 0, 'name': 'wf'}");
        assert_eq!(repaired, r#"{"name": "wf"}"#);
    }

    #[test]
    fn test_nested_string_objects_unwrapped() {
        let repaired = repair_workflow_payload(r#"{'state': '{\'a\': 1}'}"#);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["state"]["a"], 1);
    }

    #[test]
    fn test_nulls_and_trailing_commas() {
        let repaired = repair_workflow_payload("{'steps': [1, null], 'x': 2, }");
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["steps"], serde_json::json!([1]));
        assert_eq!(value["x"], 2);
    }

    #[test]
    fn test_parse_workflow_reads_name() {
        let data = parse_workflow("an-1", "{u'name': u'Align'}").unwrap();
        assert_eq!(data.name.as_deref(), Some("Align"));
    }

    #[test]
    fn test_unrepairable_payload_is_parse_error() {
        let err = parse_workflow("an-1", "{'name': ").unwrap_err();
        assert!(matches!(err, ProvGraphError::Parse { ref analysis, .. } if analysis == "an-1"));
    }
}
