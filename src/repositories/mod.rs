pub mod answer_repository;
pub mod category_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod taken_quiz_repository;
pub mod user_repository;

pub use answer_repository::{AnswerRepository, MongoAnswerRepository};
pub use category_repository::{CategoryFilter, CategoryRepository, MongoCategoryRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizFilter, QuizRepository};
pub use taken_quiz_repository::{MongoTakenQuizRepository, TakenQuizRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
