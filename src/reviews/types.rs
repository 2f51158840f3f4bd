use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node properties as the graph returns them.
pub type PropertyMap = Map<String, Value>;

/// A Person node that reviewed a movie, serialized as `{"p": {...properties}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    #[serde(rename = "p")]
    pub properties: PropertyMap,
}

impl Reviewer {
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(Value::as_str)
    }
}

/// Aggregate over the movies one person reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub user: String,
    pub count: u64,
    pub movies: Vec<PropertyMap>,
}
