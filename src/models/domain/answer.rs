use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(question_id: i64, text: &str, is_correct: bool) -> Self {
        Answer {
            id: 0,
            question_id,
            text: text.to_string(),
            is_correct,
        }
    }
}
