use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
}

impl Question {
    pub fn new(quiz_id: i64, text: &str) -> Self {
        Question {
            id: 0,
            quiz_id,
            text: text.to_string(),
        }
    }
}
