use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

/// Store-side quiz filter. The authorization layer decides which of these
/// knobs to set; the repository only translates them to a query.
#[derive(Debug, Clone, Default)]
pub struct QuizFilter {
    pub approved: Option<bool>,
    pub category_id: Option<i64>,
    pub owner_id: Option<i64>,
    /// Substring match against the title.
    pub title_query: Option<String>,
}

impl QuizFilter {
    pub fn approved_only(scope_approved_only: bool) -> Self {
        QuizFilter {
            approved: if scope_approved_only { Some(true) } else { None },
            ..QuizFilter::default()
        }
    }

    fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if let Some(approved) = self.approved {
            filter.insert("approved", approved);
        }
        if let Some(category_id) = self.category_id {
            filter.insert("category_id", category_id);
        }
        if let Some(owner_id) = self.owner_id {
            filter.insert("user_id", owner_id);
        }
        if let Some(query) = &self.title_query {
            filter.insert("title", doc! { "$regex": regex::escape(query) });
        }
        filter
    }
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Quiz>>;
    async fn list(&self, filter: &QuizFilter, offset: i64, limit: i64)
        -> AppResult<(Vec<Quiz>, i64)>;
    /// Ids of every quiz matching the filter, for cascade deletes.
    async fn find_ids(&self, filter: &QuizFilter) -> AppResult<Vec<i64>>;
    /// Rewrite title/description/category; always drops approval so the
    /// edited quiz goes back through review.
    async fn apply_update(&self, id: i64, title: &str, description: &str, category_id: i64)
        -> AppResult<()>;
    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()>;
    /// Fold one rating into the running sum. A single atomic `$inc` on
    /// both fields, so concurrent ratings never lose updates.
    async fn add_rating(&self, id: i64, rate: i64) -> AppResult<()>;
    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    db: Database,
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        let owner_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection.create_index(owner_index).await?;

        let category_index = IndexModel::builder().keys(doc! { "category_id": 1 }).build();
        self.collection.create_index(category_index).await?;

        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, mut quiz: Quiz) -> AppResult<Quiz> {
        quiz.id = self.db.next_id("quizzes").await?;
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Quiz>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let cursor = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn list(
        &self,
        filter: &QuizFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        let filter_doc = filter.to_document();

        let total = self.collection.count_documents(filter_doc.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "id": 1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter_doc)
            .with_options(find_options)
            .await?;
        let items: Vec<Quiz> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn find_ids(&self, filter: &QuizFilter) -> AppResult<Vec<i64>> {
        let cursor = self.collection.find(filter.to_document()).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes.into_iter().map(|q| q.id).collect())
    }

    async fn apply_update(
        &self,
        id: i64,
        title: &str,
        description: &str,
        category_id: i64,
    ) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "title": title,
                    "description": description,
                    "category_id": category_id,
                    "approved": false,
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "approved": approved } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn add_rating(&self, id: i64, rate: i64) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$inc": { "total_rate": rate as f64, "rate_count": 1_i64 } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.collection
            .delete_many(doc! { "id": { "$in": ids.to_vec() } })
            .await?;
        Ok(())
    }
}
