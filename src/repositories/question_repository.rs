use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Question,
};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>>;
    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<Question>>;
    async fn find_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<Vec<Question>>;
    async fn update_text(&self, id: i64, text: &str) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()>;
    async fn delete_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

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

        let quiz_index = IndexModel::builder().keys(doc! { "quiz_id": 1 }).build();
        self.collection.create_index(quiz_index).await?;

        Ok(())
    }

    async fn find_all(&self, filter: mongodb::bson::Document) -> AppResult<Vec<Question>> {
        let find_options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<Question> = cursor.try_collect().await?;
        Ok(items)
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, mut question: Question) -> AppResult<Question> {
        question.id = self.db.next_id("questions").await?;
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.find_all(doc! { "id": { "$in": ids.to_vec() } }).await
    }

    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        self.find_all(doc! { "quiz_id": quiz_id }).await
    }

    async fn find_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<Vec<Question>> {
        if quiz_ids.is_empty() {
            return Ok(vec![]);
        }
        self.find_all(doc! { "quiz_id": { "$in": quiz_ids.to_vec() } })
            .await
    }

    async fn update_text(&self, id: i64, text: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "text": text } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
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

    async fn delete_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<()> {
        if quiz_ids.is_empty() {
            return Ok(());
        }
        self.collection
            .delete_many(doc! { "quiz_id": { "$in": quiz_ids.to_vec() } })
            .await?;
        Ok(())
    }
}
