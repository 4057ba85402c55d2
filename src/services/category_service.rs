use std::sync::Arc;

use validator::Validate;

use crate::{
    authz::{self, Actor},
    errors::{AppError, AppResult},
    models::{
        domain::Category,
        dto::{request::CategoryRequest, response::CategoryView},
    },
    pagination::{Page, PageParams},
    repositories::{CategoryFilter, CategoryRepository, QuizFilter, QuizRepository},
    services::cascade::QuizCascade,
};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    quizzes: Arc<dyn QuizRepository>,
    cascade: Arc<QuizCascade>,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        quizzes: Arc<dyn QuizRepository>,
        cascade: Arc<QuizCascade>,
    ) -> Self {
        Self {
            categories,
            quizzes,
            cascade,
        }
    }

    pub async fn list(&self, actor: &Actor, params: &PageParams) -> AppResult<Page<CategoryView>> {
        let filter = CategoryFilter {
            approved_only: authz::listing_scope(actor).approved_only(),
            search: None,
        };
        self.list_filtered(&filter, params).await
    }

    pub async fn search(
        &self,
        actor: &Actor,
        query: &str,
        params: &PageParams,
    ) -> AppResult<Page<CategoryView>> {
        let filter = CategoryFilter {
            approved_only: authz::listing_scope(actor).approved_only(),
            search: Some(query.to_string()),
        };
        self.list_filtered(&filter, params).await
    }

    pub async fn get(&self, actor: &Actor, id: i64) -> AppResult<CategoryView> {
        let category = self.require_category(id).await?;
        authz::ensure_category_readable(actor, &category)?;
        Ok(category.into())
    }

    /// Anyone may submit a category, but it always lands unapproved and
    /// names must be unique.
    pub async fn create(&self, request: CategoryRequest) -> AppResult<CategoryView> {
        request.validate()?;

        if self.categories.find_by_name(&request.name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Category '{}' already exists",
                request.name
            )));
        }

        let category = Category::new(&request.name, &request.description);
        let category = self.categories.create(category).await?;
        Ok(category.into())
    }

    pub async fn approve(&self, actor: &Actor, id: i64, approved: bool) -> AppResult<()> {
        authz::require_admin(actor)?;
        self.require_category(id).await?;
        self.categories.set_approved(id, approved).await
    }

    pub async fn update(&self, actor: &Actor, id: i64, request: CategoryRequest) -> AppResult<()> {
        authz::require_admin(actor)?;
        request.validate()?;

        self.require_category(id).await?;

        if let Some(existing) = self.categories.find_by_name(&request.name).await? {
            if existing.id != id {
                return Err(AppError::AlreadyExists(format!(
                    "Can't use this name; '{}' already exists",
                    request.name
                )));
            }
        }

        self.categories
            .update(id, &request.name, &request.description)
            .await
    }

    /// Admin-only; takes the category's whole quiz graph with it.
    pub async fn delete(&self, actor: &Actor, id: i64) -> AppResult<()> {
        authz::require_admin(actor)?;
        self.require_category(id).await?;

        let in_category = QuizFilter {
            category_id: Some(id),
            ..QuizFilter::default()
        };
        let quiz_ids = self.quizzes.find_ids(&in_category).await?;
        self.cascade.delete_quizzes(&quiz_ids).await?;
        self.categories.delete(id).await
    }

    pub async fn require_category(&self, id: i64) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))
    }

    async fn list_filtered(
        &self,
        filter: &CategoryFilter,
        params: &PageParams,
    ) -> AppResult<Page<CategoryView>> {
        let (categories, total) = self
            .categories
            .list(filter, params.offset(), params.size())
            .await?;
        let views = categories.into_iter().map(CategoryView::from).collect();
        Ok(Page::new(views, total, params))
    }
}
