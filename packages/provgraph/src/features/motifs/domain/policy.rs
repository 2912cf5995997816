//! Motif equivalence policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// When two analyses of one depth group share a motif
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayeringPolicy {
    /// Same workflow
    Weak,
    /// Same workflow, subanalysis count and in/out link counts
    Strict,
}

impl LayeringPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Strict => "strict",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "weak" => Ok(Self::Weak),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "Unknown layering policy '{}'. Valid policies: weak, strict",
                s
            )),
        }
    }
}

impl Default for LayeringPolicy {
    fn default() -> Self {
        Self::Weak
    }
}

impl fmt::Display for LayeringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!(LayeringPolicy::from_str("STRICT").unwrap(), LayeringPolicy::Strict);
        assert_eq!(LayeringPolicy::from_str("weak").unwrap(), LayeringPolicy::Weak);
        assert!(LayeringPolicy::from_str("loose").is_err());
        assert_eq!(LayeringPolicy::default(), LayeringPolicy::Weak);
    }
}
