use serde::{Deserialize, Serialize};

/// A tag; tasks reference tags by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl Tag {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Tag {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}
