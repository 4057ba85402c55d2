use serde::{Deserialize, Serialize};

/// One finished quiz run. Records are immutable once written; there is no
/// update operation anywhere in the service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TakenQuiz {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub correct_answers: i64,
    pub total_answers: i64,
}

impl TakenQuiz {
    pub fn new(quiz_id: i64, user_id: i64, correct_answers: i64, total_answers: i64) -> Self {
        TakenQuiz {
            id: 0,
            quiz_id,
            user_id,
            correct_answers,
            total_answers,
        }
    }
}
