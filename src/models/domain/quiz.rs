use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    /// Owning user; the only actor allowed to edit or delete the quiz.
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    /// Running sum of submitted ratings. The mean is derived, never stored.
    pub total_rate: f64,
    pub rate_count: i64,
    pub approved: bool,
}

impl Quiz {
    pub fn new(user_id: i64, category_id: i64, title: &str, description: &str) -> Self {
        Quiz {
            id: 0,
            user_id,
            category_id,
            title: title.to_string(),
            description: description.to_string(),
            total_rate: 0.0,
            rate_count: 0,
            approved: false,
        }
    }

    pub fn average_rate(&self) -> Option<f64> {
        if self.rate_count > 0 {
            Some(self.total_rate / self.rate_count as f64)
        } else {
            None
        }
    }
}
