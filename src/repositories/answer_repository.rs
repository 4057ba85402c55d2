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
    models::domain::Answer,
};

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn create(&self, answer: Answer) -> AppResult<Answer>;
    async fn create_many(&self, answers: Vec<Answer>) -> AppResult<Vec<Answer>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Answer>>;
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Answer>>;
    async fn find_by_question_ids(&self, question_ids: &[i64]) -> AppResult<Vec<Answer>>;
    async fn update(&self, id: i64, text: &str, is_correct: bool) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn delete_by_ids(&self, ids: &[i64]) -> AppResult<()>;
    async fn delete_by_question_ids(&self, question_ids: &[i64]) -> AppResult<()>;
}

pub struct MongoAnswerRepository {
    db: Database,
    collection: Collection<Answer>,
}

impl MongoAnswerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("answers");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for answers collection");

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

        let question_index = IndexModel::builder().keys(doc! { "question_id": 1 }).build();
        self.collection.create_index(question_index).await?;

        Ok(())
    }

    async fn find_all(&self, filter: mongodb::bson::Document) -> AppResult<Vec<Answer>> {
        let find_options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<Answer> = cursor.try_collect().await?;
        Ok(items)
    }
}

#[async_trait]
impl AnswerRepository for MongoAnswerRepository {
    async fn create(&self, mut answer: Answer) -> AppResult<Answer> {
        answer.id = self.db.next_id("answers").await?;
        self.collection.insert_one(&answer).await?;
        Ok(answer)
    }

    async fn create_many(&self, mut answers: Vec<Answer>) -> AppResult<Vec<Answer>> {
        if answers.is_empty() {
            return Ok(answers);
        }
        for answer in answers.iter_mut() {
            answer.id = self.db.next_id("answers").await?;
        }
        self.collection.insert_many(&answers).await?;
        Ok(answers)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Answer>> {
        let answer = self.collection.find_one(doc! { "id": id }).await?;
        Ok(answer)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Answer>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.find_all(doc! { "id": { "$in": ids.to_vec() } }).await
    }

    async fn find_by_question_ids(&self, question_ids: &[i64]) -> AppResult<Vec<Answer>> {
        if question_ids.is_empty() {
            return Ok(vec![]);
        }
        self.find_all(doc! { "question_id": { "$in": question_ids.to_vec() } })
            .await
    }

    async fn update(&self, id: i64, text: &str, is_correct: bool) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "text": text, "is_correct": is_correct } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Answer with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Answer with id '{}' not found",
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

    async fn delete_by_question_ids(&self, question_ids: &[i64]) -> AppResult<()> {
        if question_ids.is_empty() {
            return Ok(());
        }
        self.collection
            .delete_many(doc! { "question_id": { "$in": question_ids.to_vec() } })
            .await?;
        Ok(())
    }
}
