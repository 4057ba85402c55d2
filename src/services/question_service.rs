use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use validator::Validate;

use crate::{
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{domain::Question, dto::request::QuestionRequest},
    repositories::{AnswerRepository, QuestionRepository, QuizRepository},
};

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            questions,
            answers,
            quizzes,
        }
    }

    pub async fn create(&self, actor: &Actor, request: QuestionRequest) -> AppResult<Question> {
        request.validate()?;

        let quiz = self
            .quizzes
            .find_by_id(request.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", request.quiz_id))
            })?;
        authz::require_owner(actor, quiz.user_id)?;

        let question = Question::new(request.quiz_id, &request.text);
        self.questions.create(question).await
    }

    pub async fn update(&self, actor: &Actor, id: i64, request: QuestionRequest) -> AppResult<()> {
        request.validate()?;

        self.require_question(id).await?;

        let quiz = self
            .quizzes
            .find_by_id(request.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", request.quiz_id))
            })?;
        authz::require_owner(actor, quiz.user_id)?;

        self.questions.update_text(id, &request.text).await
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let question = self.require_question(id).await?;

        let quiz = self
            .quizzes
            .find_by_id(question.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", question.quiz_id))
            })?;
        authz::require_owner(actor, quiz.user_id)?;

        self.answers.delete_by_question_ids(&[id]).await?;
        self.questions.delete(id).await
    }

    /// Bulk delete, silently restricted to questions inside the actor's
    /// own quizzes. Ids the actor does not own are skipped, not errors.
    pub async fn bulk_delete(&self, actor: &Actor, ids: &[i64]) -> AppResult<()> {
        let questions = self.questions.find_by_ids(ids).await?;

        let quiz_ids: Vec<i64> = questions
            .iter()
            .map(|q| q.quiz_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let quizzes = self.quizzes.find_by_ids(&quiz_ids).await?;
        let owners: HashMap<i64, i64> = quizzes.iter().map(|q| (q.id, q.user_id)).collect();

        let owned_ids: Vec<i64> = questions
            .iter()
            .filter(|question| owners.get(&question.quiz_id) == Some(&actor.id))
            .map(|question| question.id)
            .collect();

        self.answers.delete_by_question_ids(&owned_ids).await?;
        self.questions.delete_by_ids(&owned_ids).await
    }

    async fn require_question(&self, id: i64) -> AppResult<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }
}
