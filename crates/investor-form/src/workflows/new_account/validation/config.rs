use serde::{Deserialize, Serialize};

/// Bounds applied by the rule table. Lengths are counted in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaLimits {
    pub full_name_min_chars: usize,
    pub full_name_max_chars: usize,
    pub minimum_investment: f64,
    pub comment_min_chars: usize,
    pub comment_max_chars: usize,
    pub min_dependents: i32,
    pub max_dependents: i32,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            full_name_min_chars: 2,
            full_name_max_chars: 100,
            minimum_investment: 100.0,
            comment_min_chars: 20,
            comment_max_chars: 100,
            min_dependents: 0,
            max_dependents: 5,
        }
    }
}
