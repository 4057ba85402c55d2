use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{
        domain::TakenQuiz,
        dto::{request::TakenQuizRequest, response::TakenQuizView},
    },
    pagination::{Page, PageParams},
    repositories::{QuizRepository, TakenQuizRepository, UserRepository},
};

pub struct TakenQuizService {
    taken_quizzes: Arc<dyn TakenQuizRepository>,
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
}

impl TakenQuizService {
    pub fn new(
        taken_quizzes: Arc<dyn TakenQuizRepository>,
        quizzes: Arc<dyn QuizRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            taken_quizzes,
            quizzes,
            users,
        }
    }

    pub async fn list_own(&self, actor: &Actor, params: &PageParams) -> AppResult<Page<TakenQuizView>> {
        self.history_page(actor.id, params).await
    }

    /// Another user's history. Requires the target to exist but no role
    /// beyond authentication; results are scores, not quiz content.
    pub async fn list_for_user(
        &self,
        _actor: &Actor,
        user_id: i64,
        params: &PageParams,
    ) -> AppResult<Page<TakenQuizView>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }
        self.history_page(user_id, params).await
    }

    /// Record a finished run against the actor. Only approved quizzes can
    /// be taken; the record itself is immutable once written.
    pub async fn create(&self, actor: &Actor, request: TakenQuizRequest) -> AppResult<TakenQuiz> {
        request.validate()?;

        let quiz = self
            .quizzes
            .find_by_id(request.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", request.quiz_id))
            })?;
        authz::ensure_quiz_takeable(&quiz)?;

        let taken = TakenQuiz::new(
            request.quiz_id,
            actor.id,
            request.correct_answers,
            request.total_answers,
        );
        self.taken_quizzes.create(taken).await
    }

    async fn history_page(&self, user_id: i64, params: &PageParams) -> AppResult<Page<TakenQuizView>> {
        let (taken, total) = self
            .taken_quizzes
            .list_by_user(user_id, params.offset(), params.size())
            .await?;

        let quiz_ids: Vec<i64> = taken.iter().map(|t| t.quiz_id).collect();
        let quizzes = self.quizzes.find_by_ids(&quiz_ids).await?;
        let by_id: HashMap<i64, _> = quizzes.into_iter().map(|q| (q.id, q)).collect();

        // Taken records cascade with their quiz, so the lookup only misses
        // if a concurrent delete slipped between the two reads.
        let views: Vec<TakenQuizView> = taken
            .into_iter()
            .filter_map(|record| {
                by_id
                    .get(&record.quiz_id)
                    .map(|quiz| TakenQuizView::new(record, quiz))
            })
            .collect();

        Ok(Page::new(views, total, params))
    }
}
