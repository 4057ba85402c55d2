use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use validator::Validate;

use crate::{
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{domain::Answer, dto::request::AnswerRequest},
    repositories::{AnswerRepository, QuestionRepository, QuizRepository},
};

pub struct AnswerService {
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<dyn QuestionRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl AnswerService {
    pub fn new(
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<dyn QuestionRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            answers,
            questions,
            quizzes,
        }
    }

    pub async fn create(&self, actor: &Actor, request: AnswerRequest) -> AppResult<Answer> {
        request.validate()?;

        self.require_question_owned(actor, request.question_id)
            .await?;

        let answer = Answer::new(request.question_id, &request.text, request.is_correct);
        self.answers.create(answer).await
    }

    /// Bulk insert across questions. Every referenced question must belong
    /// to one of the actor's quizzes; if any id is outside that set the
    /// whole request is rejected naming the offenders.
    pub async fn bulk_create(&self, actor: &Actor, requests: Vec<AnswerRequest>) -> AppResult<Vec<Answer>> {
        for request in &requests {
            request.validate()?;
        }

        let question_ids: Vec<i64> = requests
            .iter()
            .map(|r| r.question_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let allowed = self.owned_question_ids(actor, &question_ids).await?;

        let mut invalid: Vec<i64> = question_ids
            .into_iter()
            .filter(|id| !allowed.contains(id))
            .collect();
        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(AppError::Forbidden(format!(
                "You don't have access to question ids: {:?}",
                invalid
            )));
        }

        let answers: Vec<Answer> = requests
            .into_iter()
            .map(|r| Answer::new(r.question_id, &r.text, r.is_correct))
            .collect();
        self.answers.create_many(answers).await
    }

    pub async fn update(&self, actor: &Actor, id: i64, request: AnswerRequest) -> AppResult<()> {
        request.validate()?;

        self.require_answer(id).await?;
        self.require_question_owned(actor, request.question_id)
            .await?;

        self.answers
            .update(id, &request.text, request.is_correct)
            .await
    }

    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let answer = self.require_answer(id).await?;
        self.require_question_owned(actor, answer.question_id)
            .await?;

        self.answers.delete(id).await
    }

    /// Bulk delete, owner-filtered: ids pointing into other people's
    /// quizzes are skipped rather than rejected.
    pub async fn bulk_delete(&self, actor: &Actor, ids: &[i64]) -> AppResult<()> {
        let answers = self.answers.find_by_ids(ids).await?;

        let question_ids: Vec<i64> = answers
            .iter()
            .map(|a| a.question_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let allowed = self.owned_question_ids(actor, &question_ids).await?;

        let owned_ids: Vec<i64> = answers
            .iter()
            .filter(|answer| allowed.contains(&answer.question_id))
            .map(|answer| answer.id)
            .collect();

        self.answers.delete_by_ids(&owned_ids).await
    }

    async fn require_answer(&self, id: i64) -> AppResult<Answer> {
        self.answers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Answer with id '{}' not found", id)))
    }

    /// Resolve question -> quiz -> owner, failing NotFound at each missing
    /// step and Forbidden when the quiz belongs to someone else.
    async fn require_question_owned(&self, actor: &Actor, question_id: i64) -> AppResult<()> {
        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Question with id '{}' not found", question_id))
            })?;

        let quiz = self
            .quizzes
            .find_by_id(question.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", question.quiz_id))
            })?;

        authz::require_owner(actor, quiz.user_id)
    }

    /// Of the given question ids, the subset living in quizzes the actor
    /// owns.
    async fn owned_question_ids(&self, actor: &Actor, question_ids: &[i64]) -> AppResult<HashSet<i64>> {
        let questions = self.questions.find_by_ids(question_ids).await?;

        let quiz_ids: Vec<i64> = questions
            .iter()
            .map(|q| q.quiz_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let quizzes = self.quizzes.find_by_ids(&quiz_ids).await?;
        let owners: HashMap<i64, i64> = quizzes.iter().map(|q| (q.id, q.user_id)).collect();

        Ok(questions
            .iter()
            .filter(|question| owners.get(&question.quiz_id) == Some(&actor.id))
            .map(|question| question.id)
            .collect())
    }
}
