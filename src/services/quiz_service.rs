use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{
        domain::Quiz,
        dto::{
            request::QuizRequest,
            response::{QuestionView, QuizDetail, QuizSummary, UserProfile},
        },
    },
    pagination::{Page, PageParams},
    repositories::{
        AnswerRepository, CategoryRepository, QuestionRepository, QuizFilter, QuizRepository,
        UserRepository,
    },
    services::cascade::QuizCascade,
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
    cascade: Arc<QuizCascade>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
        cascade: Arc<QuizCascade>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            answers,
            categories,
            users,
            cascade,
        }
    }

    pub async fn list(&self, actor: &Actor, params: &PageParams) -> AppResult<Page<QuizSummary>> {
        let filter = QuizFilter::approved_only(authz::listing_scope(actor).approved_only());
        self.list_filtered(&filter, params).await
    }

    /// The actor's own quizzes, approved or not.
    pub async fn list_own(&self, actor: &Actor, params: &PageParams) -> AppResult<Page<QuizSummary>> {
        let filter = QuizFilter {
            owner_id: Some(actor.id),
            ..QuizFilter::default()
        };
        self.list_filtered(&filter, params).await
    }

    pub async fn search(
        &self,
        actor: &Actor,
        query: &str,
        params: &PageParams,
    ) -> AppResult<Page<QuizSummary>> {
        let mut filter = QuizFilter::approved_only(authz::listing_scope(actor).approved_only());
        filter.title_query = Some(query.to_string());
        self.list_filtered(&filter, params).await
    }

    /// Review queue: everything still waiting for approval. Admin only.
    pub async fn list_unapproved(
        &self,
        actor: &Actor,
        params: &PageParams,
    ) -> AppResult<Page<QuizSummary>> {
        authz::require_admin(actor)?;
        let filter = QuizFilter {
            approved: Some(false),
            ..QuizFilter::default()
        };
        self.list_filtered(&filter, params).await
    }

    pub async fn list_by_category(
        &self,
        actor: &Actor,
        category_id: i64,
        params: &PageParams,
    ) -> AppResult<Page<QuizSummary>> {
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                category_id
            )));
        }

        let mut filter = QuizFilter::approved_only(authz::listing_scope(actor).approved_only());
        filter.category_id = Some(category_id);
        self.list_filtered(&filter, params).await
    }

    /// Another user's quizzes: admins see everything, other actors only
    /// the approved ones.
    pub async fn list_by_user(
        &self,
        actor: &Actor,
        user_id: i64,
        params: &PageParams,
    ) -> AppResult<Page<QuizSummary>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }

        let mut filter = QuizFilter::approved_only(authz::listing_scope(actor).approved_only());
        filter.owner_id = Some(user_id);
        self.list_filtered(&filter, params).await
    }

    /// Full quiz graph as one read model: questions with answers, the
    /// category card and the owner's profile.
    pub async fn get_detail(&self, actor: &Actor, id: i64) -> AppResult<QuizDetail> {
        let quiz = self.require_quiz(id).await?;
        authz::ensure_quiz_readable(actor, &quiz)?;

        let questions = self.questions.find_by_quiz(quiz.id).await?;
        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let answers = self.answers.find_by_question_ids(&question_ids).await?;

        let mut answers_by_question: HashMap<i64, Vec<_>> = HashMap::new();
        for answer in answers {
            answers_by_question
                .entry(answer.question_id)
                .or_default()
                .push(answer);
        }

        let question_views: Vec<QuestionView> = questions
            .into_iter()
            .map(|question| {
                let answers = answers_by_question.remove(&question.id).unwrap_or_default();
                QuestionView::new(question, answers)
            })
            .collect();

        let category = self
            .categories
            .find_by_id(quiz.category_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Category with id '{}' not found", quiz.category_id))
            })?;
        let owner = self.users.find_by_id(quiz.user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("User with id '{}' not found", quiz.user_id))
        })?;

        let average_rate = quiz.average_rate();
        Ok(QuizDetail {
            id: quiz.id,
            owner: UserProfile::from(owner),
            category: category.into(),
            title: quiz.title,
            description: quiz.description,
            approved: quiz.approved,
            total_rate: quiz.total_rate,
            rate_count: quiz.rate_count,
            average_rate,
            questions: question_views,
        })
    }

    /// New quizzes are owned by the actor and start unapproved; the input
    /// carries no approval flag at all.
    pub async fn create(&self, actor: &Actor, request: QuizRequest) -> AppResult<QuizSummary> {
        request.validate()?;

        if self
            .categories
            .find_by_id(request.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                request.category_id
            )));
        }

        let quiz = Quiz::new(
            actor.id,
            request.category_id,
            &request.title,
            &request.description,
        );
        let quiz = self.quizzes.create(quiz).await?;
        Ok(quiz.into())
    }

    pub async fn rate(&self, _actor: &Actor, id: i64, rate: i64) -> AppResult<()> {
        let quiz = self.require_quiz(id).await?;
        authz::ensure_quiz_ratable(&quiz)?;
        self.quizzes.add_rating(id, rate).await
    }

    pub async fn approve(&self, actor: &Actor, id: i64, approved: bool) -> AppResult<()> {
        authz::require_admin(actor)?;
        self.require_quiz(id).await?;
        self.quizzes.set_approved(id, approved).await
    }

    /// Owner-only edit; the quiz goes back to unapproved for re-review.
    pub async fn update(&self, actor: &Actor, id: i64, request: QuizRequest) -> AppResult<()> {
        request.validate()?;

        if self
            .categories
            .find_by_id(request.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                request.category_id
            )));
        }

        let quiz = self.require_quiz(id).await?;
        authz::require_owner(actor, quiz.user_id)?;

        self.quizzes
            .apply_update(id, &request.title, &request.description, request.category_id)
            .await
    }

    /// Owner-only with no admin override. Cascades the question/answer
    /// graph and the taken-quiz history.
    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        let quiz = self.require_quiz(id).await?;
        authz::require_owner(actor, quiz.user_id)?;
        self.cascade.delete_quizzes(&[id]).await
    }

    pub async fn require_quiz(&self, id: i64) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn list_filtered(
        &self,
        filter: &QuizFilter,
        params: &PageParams,
    ) -> AppResult<Page<QuizSummary>> {
        let (quizzes, total) = self
            .quizzes
            .list(filter, params.offset(), params.size())
            .await?;
        let summaries = quizzes.into_iter().map(QuizSummary::from).collect();
        Ok(Page::new(summaries, total, params))
    }
}
