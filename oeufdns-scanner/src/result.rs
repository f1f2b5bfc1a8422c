use serde::{Deserialize, Serialize};

/// A single candidate produced by a discovery strategy, before it is folded
/// into the graph. The relation is carried as a free-form label here; the
/// crawler maps it onto [`crate::graph::RelationKind`] when inserting edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discovery {
    pub value: String,
    pub is_ip: bool,
    pub relation: String,
    pub source: String,
    pub info: String,
}

impl Discovery {
    pub fn domain(value: &str, relation: &str, source: &str) -> Self {
        Self {
            value: value.to_string(),
            is_ip: false,
            relation: relation.to_string(),
            source: source.to_string(),
            info: String::new(),
        }
    }

    pub fn ip(value: &str, relation: &str, source: &str) -> Self {
        Self {
            value: value.to_string(),
            is_ip: true,
            relation: relation.to_string(),
            source: source.to_string(),
            info: String::new(),
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}
