pub mod answer;
pub mod category;
pub mod question;
pub mod quiz;
pub mod taken_quiz;
pub mod user;

pub use answer::Answer;
pub use category::Category;
pub use question::Question;
pub use quiz::Quiz;
pub use taken_quiz::TakenQuiz;
pub use user::{Role, User};
