use serde::{Deserialize, Serialize};

/// A task list (project / area) that tasks point at by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
    /// Icon name, e.g. `briefcase`
    #[serde(default)]
    pub icon: String,
    /// Color name, e.g. `green`
    #[serde(default)]
    pub color: String,
}

impl List {
    pub fn new(id: &str, name: &str, icon: &str, color: &str) -> Self {
        List {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}
