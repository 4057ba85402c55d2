use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub approved: bool,
}

impl Category {
    /// New categories always start unapproved, whoever submits them.
    pub fn new(name: &str, description: &str) -> Self {
        Category {
            id: 0,
            name: name.to_string(),
            description: description.to_string(),
            approved: false,
        }
    }
}
