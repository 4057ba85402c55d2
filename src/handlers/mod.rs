pub mod answer_handler;
pub mod auth_handler;
pub mod category_handler;
pub mod question_handler;
pub mod quiz_handler;
pub mod taken_quiz_handler;
pub mod user_handler;

pub use answer_handler::{
    bulk_create_answers, bulk_delete_answers, create_answer, delete_answer, update_answer,
};
pub use auth_handler::{login, register};
pub use category_handler::{
    approve_category, create_category, delete_category, get_categories, get_category,
    search_categories, update_category,
};
pub use question_handler::{
    bulk_delete_questions, create_question, delete_question, update_question,
};
pub use quiz_handler::{
    approve_quiz, create_quiz, delete_quiz, filter_quizzes, get_own_quizzes, get_quiz,
    get_quizzes, get_unapproved_quizzes, get_user_quizzes, rate_quiz, search_quizzes, update_quiz,
};
pub use taken_quiz_handler::{get_own_history, get_user_history, record_taken_quiz};
pub use user_handler::{
    change_password, delete_account, demote_user, get_all_users, get_profile, get_user_by_id,
    health_check, health_check_live, health_check_ready, promote_user, update_profile,
};
