use std::sync::Arc;

use crate::{
    errors::AppResult,
    repositories::{AnswerRepository, QuestionRepository, QuizRepository, TakenQuizRepository},
};

/// Child-first deletion of quiz graphs. The store has no foreign keys, so
/// the relational cascade (quiz -> questions -> answers, quiz -> taken
/// records) is spelled out here and shared by the user, category and quiz
/// services.
pub struct QuizCascade {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    taken_quizzes: Arc<dyn TakenQuizRepository>,
}

impl QuizCascade {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        taken_quizzes: Arc<dyn TakenQuizRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            answers,
            taken_quizzes,
        }
    }

    /// Delete the given quizzes together with their questions, answers and
    /// taken-quiz records.
    pub async fn delete_quizzes(&self, quiz_ids: &[i64]) -> AppResult<()> {
        if quiz_ids.is_empty() {
            return Ok(());
        }

        let questions = self.questions.find_by_quiz_ids(quiz_ids).await?;
        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();

        self.answers.delete_by_question_ids(&question_ids).await?;
        self.questions.delete_by_quiz_ids(quiz_ids).await?;
        self.taken_quizzes.delete_by_quiz_ids(quiz_ids).await?;
        self.quizzes.delete_by_ids(quiz_ids).await?;

        Ok(())
    }
}
