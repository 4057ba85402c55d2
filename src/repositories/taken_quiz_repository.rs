use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::TakenQuiz};

#[async_trait]
pub trait TakenQuizRepository: Send + Sync {
    async fn create(&self, taken_quiz: TakenQuiz) -> AppResult<TakenQuiz>;
    async fn list_by_user(&self, user_id: i64, offset: i64, limit: i64)
        -> AppResult<(Vec<TakenQuiz>, i64)>;
    async fn delete_by_user(&self, user_id: i64) -> AppResult<()>;
    async fn delete_by_quiz_ids(&self, quiz_ids: &[i64]) -> AppResult<()>;
}

pub struct MongoTakenQuizRepository {
    db: Database,
    collection: Collection<TakenQuiz>,
}

impl MongoTakenQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("taken_quizzes");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for taken_quizzes collection");

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

        let user_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection.create_index(user_index).await?;

        Ok(())
    }
}

#[async_trait]
impl TakenQuizRepository for MongoTakenQuizRepository {
    async fn create(&self, mut taken_quiz: TakenQuiz) -> AppResult<TakenQuiz> {
        taken_quiz.id = self.db.next_id("taken_quizzes").await?;
        self.collection.insert_one(&taken_quiz).await?;
        Ok(taken_quiz)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TakenQuiz>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "id": 1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<TakenQuiz> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn delete_by_user(&self, user_id: i64) -> AppResult<()> {
        self.collection
            .delete_many(doc! { "user_id": user_id })
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
