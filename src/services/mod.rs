pub mod answer_service;
pub mod cascade;
pub mod category_service;
pub mod question_service;
pub mod quiz_service;
pub mod taken_quiz_service;
pub mod user_service;

pub use answer_service::AnswerService;
pub use cascade::QuizCascade;
pub use category_service::CategoryService;
pub use question_service::QuestionService;
pub use quiz_service::QuizService;
pub use taken_quiz_service::TakenQuizService;
pub use user_service::UserService;
