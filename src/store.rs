use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneOptions, FindOptions, UpdateOptions},
    Collection, Database,
};

use crate::{
    errors::Result,
    schemas::{MonthExpenses, Year},
};

pub const COLLECTION_NAME: &str = "expenses";

/// Persistence for month sheets, keyed by (year, month).
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Replace the sheet with the same (year, month), or insert it if there
    /// is none.
    async fn upsert(&self, sheet: &MonthExpenses) -> Result<()>;

    async fn find_month(&self, year: Year, month: &str) -> Result<Option<MonthExpenses>>;

    /// At most `limit` sheets for `year`, in whatever order the store returns
    /// them.
    async fn find_year(&self, year: Year, limit: i64) -> Result<Vec<MonthExpenses>>;

    /// Returns whether a sheet was removed.
    async fn delete_month(&self, year: Year, month: &str) -> Result<bool>;
}

/// The match filter shared by every key-based operation.
pub fn month_filter(year: Year, month: &str) -> Document {
    doc! { "month": month, "year": year }
}

fn without_id() -> Document {
    doc! { "_id": 0 }
}

pub struct MongoExpenseStore {
    collection: Collection<MonthExpenses>,
}

impl MongoExpenseStore {
    pub fn new(database: &Database) -> Self {
        MongoExpenseStore {
            collection: database.collection(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl ExpenseStore for MongoExpenseStore {
    async fn upsert(&self, sheet: &MonthExpenses) -> Result<()> {
        let options = UpdateOptions::builder().upsert(true).build();
        self.collection
            .update_one(
                month_filter(sheet.year, &sheet.month),
                doc! { "$set": bson::to_document(sheet)? },
                options,
            )
            .await?;
        Ok(())
    }

    async fn find_month(&self, year: Year, month: &str) -> Result<Option<MonthExpenses>> {
        let options = FindOneOptions::builder().projection(without_id()).build();
        let sheet = self
            .collection
            .find_one(month_filter(year, month), options)
            .await?;
        Ok(sheet)
    }

    async fn find_year(&self, year: Year, limit: i64) -> Result<Vec<MonthExpenses>> {
        let options = FindOptions::builder()
            .projection(without_id())
            .limit(limit)
            .build();
        let cursor = self.collection.find(doc! { "year": year }, options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_month(&self, year: Year, month: &str) -> Result<bool> {
        let result = self
            .collection
            .delete_one(month_filter(year, month), None)
            .await?;
        Ok(result.deleted_count > 0)
    }
}
