//! Options for controlling the type checker.

use ecow::EcoString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{BOOL, NUM};

/// Operand and result constructors of a binary operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpSignature {
    pub lhs: EcoString,
    pub rhs: EcoString,
    pub output: EcoString,
}

impl OpSignature {
    pub fn new(
        lhs: impl Into<EcoString>,
        rhs: impl Into<EcoString>,
        output: impl Into<EcoString>,
    ) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            output: output.into(),
        }
    }
}

/// Options for controlling the checker's behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TyperOptions {
    /// Whether to keep checking declarations after one failed
    pub continue_on_error: bool,

    /// Maximum number of errors to report
    pub error_limit: Option<usize>,

    /// Type of every parameter and the result of an extern declaration
    pub extern_type: EcoString,

    /// Signatures of the binary operators
    pub operators: IndexMap<char, OpSignature>,
}

impl Default for TyperOptions {
    fn default() -> Self {
        let arith = OpSignature::new(NUM, NUM, NUM);
        let cmp = OpSignature::new(NUM, NUM, BOOL);

        let operators = ['+', '-', '*', '/']
            .into_iter()
            .map(|op| (op, arith.clone()))
            .chain(['<', '>'].into_iter().map(|op| (op, cmp.clone())))
            .collect();

        Self {
            continue_on_error: true,
            error_limit: Some(20),
            extern_type: NUM.into(),
            operators,
        }
    }
}

impl TyperOptions {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn operator(&self, op: char) -> Option<&OpSignature> {
        self.operators.get(&op)
    }

    /// Whether `count` errors are enough to stop checking.
    pub fn limit_reached(&self, count: usize) -> bool {
        self.error_limit.is_some_and(|limit| count >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_operators() {
        let options = TyperOptions::default();

        assert_eq!(options.operator('+'), Some(&OpSignature::new("Num", "Num", "Num")));
        assert_eq!(options.operator('<'), Some(&OpSignature::new("Num", "Num", "Bool")));
        assert!(options.operator('%').is_none());
        assert_eq!(options.operators.len(), 6);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options = TyperOptions::from_json(r#"{ "error_limit": 2 }"#).unwrap();

        assert_eq!(options.error_limit, Some(2));
        assert!(options.continue_on_error);
        assert_eq!(options.extern_type.as_str(), "Num");
        assert_eq!(options.operators, TyperOptions::default().operators);
    }

    #[test]
    fn operators_from_json() {
        let json = r#"{
            "operators": { "&": { "lhs": "Bool", "rhs": "Bool", "output": "Bool" } }
        }"#;
        let options = TyperOptions::from_json(json).unwrap();

        assert_eq!(options.operators.len(), 1);
        assert_eq!(options.operator('&'), Some(&OpSignature::new("Bool", "Bool", "Bool")));
        assert!(options.operator('+').is_none());
    }

    #[test]
    fn json_round_trip() {
        let options = TyperOptions::default();
        let json = options.to_json().unwrap();

        assert_eq!(TyperOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn limit() {
        let mut options = TyperOptions::default();
        assert!(!options.limit_reached(19));
        assert!(options.limit_reached(20));

        options.error_limit = None;
        assert!(!options.limit_reached(usize::MAX));
    }
}
