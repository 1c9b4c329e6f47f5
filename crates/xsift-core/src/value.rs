//! Bound SQL parameter values

use serde::{Deserialize, Serialize};

/// A value bound to a positional `?` placeholder in a compiled query.
///
/// Query literals always bind as text; the store's column affinity handles
/// numeric comparison. Integer values appear only in compiler-generated
/// fragments such as the repository access floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

impl BindValue {
    /// The textual form, for logging and assertions
    pub fn as_text(&self) -> String {
        match self {
            BindValue::Text(s) => s.clone(),
            BindValue::Integer(i) => i.to_string(),
        }
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::Text(s)
    }
}

impl From<i64> for BindValue {
    fn from(i: i64) -> Self {
        BindValue::Integer(i)
    }
}
