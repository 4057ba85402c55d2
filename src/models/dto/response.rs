use serde::Serialize;

use crate::models::domain::{Answer, Category, Question, Quiz, Role, TakenQuiz, User};

/// Public view of a user; the password hash never leaves the store layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub display_name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            display_name: user.display_name,
            username: user.username,
            about: user.about,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub approved: bool,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        CategoryView {
            id: category.id,
            name: category.name,
            description: category.description,
            approved: category.approved,
        }
    }
}

/// Embedded category reference inside a quiz detail; approval state is
/// implied by the quiz being visible at all.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShort {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryShort {
    fn from(category: Category) -> Self {
        CategoryShort {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl From<Answer> for AnswerView {
    fn from(answer: Answer) -> Self {
        AnswerView {
            id: answer.id,
            text: answer.text,
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub text: String,
    pub answers: Vec<AnswerView>,
}

impl QuestionView {
    pub fn new(question: Question, answers: Vec<Answer>) -> Self {
        QuestionView {
            id: question.id,
            text: question.text,
            answers: answers.into_iter().map(AnswerView::from).collect(),
        }
    }
}

/// Listing projection of a quiz: no question graph, just the card facts.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummary {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub approved: bool,
    pub total_rate: f64,
    pub rate_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rate: Option<f64>,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        let average_rate = quiz.average_rate();
        QuizSummary {
            id: quiz.id,
            user_id: quiz.user_id,
            category_id: quiz.category_id,
            title: quiz.title,
            description: quiz.description,
            approved: quiz.approved,
            total_rate: quiz.total_rate,
            rate_count: quiz.rate_count,
            average_rate,
        }
    }
}

/// Detail projection: the full quiz graph as one response shape, assembled
/// by the quiz service from point lookups.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDetail {
    pub id: i64,
    pub owner: UserProfile,
    pub category: CategoryShort,
    pub title: String,
    pub description: String,
    pub approved: bool,
    pub total_rate: f64,
    pub rate_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rate: Option<f64>,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TakenQuizView {
    pub id: i64,
    pub quiz_id: i64,
    pub correct_answers: i64,
    pub total_answers: i64,
    pub quiz_title: String,
    pub quiz_description: String,
}

impl TakenQuizView {
    pub fn new(taken: TakenQuiz, quiz: &Quiz) -> Self {
        TakenQuizView {
            id: taken.id,
            quiz_id: taken.quiz_id,
            correct_answers: taken.correct_answers,
            total_answers: taken.total_answers,
            quiz_title: quiz.title.clone(),
            quiz_description: quiz.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
