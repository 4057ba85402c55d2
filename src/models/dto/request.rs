use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

static UPPERCASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWERCASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid regex"));
static SPECIAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@$!%*?&]").expect("valid regex"));

/// Password policy: length, upper, lower, digit and one of `@$!%*?&`.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short")
            .with_message("Password must be at least 8 characters long.".into()));
    }
    if !UPPERCASE_REGEX.is_match(password) {
        return Err(ValidationError::new("password_no_uppercase")
            .with_message("Password must contain at least one uppercase letter.".into()));
    }
    if !LOWERCASE_REGEX.is_match(password) {
        return Err(ValidationError::new("password_no_lowercase")
            .with_message("Password must contain at least one lowercase letter.".into()));
    }
    if !DIGIT_REGEX.is_match(password) {
        return Err(ValidationError::new("password_no_digit")
            .with_message("Password must contain at least one digit.".into()));
    }
    if !SPECIAL_REGEX.is_match(password) {
        return Err(ValidationError::new("password_no_special")
            .with_message("Password must contain at least one special character (@$!%*?&).".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub display_name: String,

    #[validate(
        length(min = 3, max = 20),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must contain only letters, numbers, or underscores."
        )
    )]
    pub username: String,

    #[validate(length(min = 10, max = 300))]
    pub about: Option<String>,

    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(length(min = 2, max = 100))]
    pub display_name: String,

    #[validate(length(min = 10, max = 300))]
    pub about: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordUpdateRequest {
    pub current_password: String,

    #[validate(custom(function = "validate_password"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 3, max = 60))]
    pub name: String,

    #[validate(length(min = 3, max = 350))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizRequest {
    pub category_id: i64,

    #[validate(length(min = 3, max = 60))]
    pub title: String,

    #[validate(length(min = 3, max = 450))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionRequest {
    pub quiz_id: i64,

    #[validate(length(min = 3, max = 450))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerRequest {
    pub question_id: i64,

    #[validate(length(min = 3, max = 150))]
    pub text: String,

    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TakenQuizRequest {
    pub quiz_id: i64,

    #[validate(range(min = 0))]
    pub correct_answers: i64,

    #[validate(range(min = 1))]
    pub total_answers: i64,
}

/// Query parameters for the approve endpoints; approval is an explicit
/// flag so an admin can also revoke it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalParams {
    pub approved: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateParams {
    pub rate: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryFilterParams {
    pub category_id: i64,
}
