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
    models::domain::Category,
};

/// Store-side filter built by the caller from the actor's listing scope.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub approved_only: bool,
    /// Substring match against name or description.
    pub search: Option<String>,
}

impl CategoryFilter {
    fn to_document(&self) -> Document {
        let mut filter = doc! {};
        if self.approved_only {
            filter.insert("approved", true);
        }
        if let Some(query) = &self.search {
            let pattern = regex::escape(query);
            filter.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": &pattern } },
                    doc! { "description": { "$regex": &pattern } },
                ],
            );
        }
        filter
    }
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> AppResult<Category>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;
    async fn list(&self, filter: &CategoryFilter, offset: i64, limit: i64)
        -> AppResult<(Vec<Category>, i64)>;
    async fn update(&self, id: i64, name: &str, description: &str) -> AppResult<()>;
    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoCategoryRepository {
    db: Database,
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("categories");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for categories collection");

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

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(name_index).await?;

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, mut category: Category) -> AppResult<Category> {
        category.id = self.db.next_id("categories").await?;
        self.collection.insert_one(&category).await?;
        Ok(category)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "id": id }).await?;
        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let category = self.collection.find_one(doc! { "name": name }).await?;
        Ok(category)
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Category>, i64)> {
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
        let items: Vec<Category> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": { "name": name, "description": description } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn set_approved(&self, id: i64, approved: bool) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": { "approved": approved } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
