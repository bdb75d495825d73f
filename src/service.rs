use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    errors::Result,
    schemas::{MonthExpenses, MonthExpensesCreate, MonthExpensesResponse, Year},
    store::ExpenseStore,
};

/// A year never holds more than one sheet per calendar month.
pub const MAX_MONTHS_PER_YEAR: i64 = 12;

/// Sits between the HTTP handlers and the store. Owns the (year, month)
/// business key and the server-side `updated_at` timestamp.
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        ExpenseService { store }
    }

    /// Overwrites the whole sheet for `data.year`/`data.month`, creating it if
    /// needed. Rows are replaced, never merged.
    pub async fn save_month_expenses(
        &self,
        data: MonthExpensesCreate,
    ) -> Result<MonthExpensesResponse> {
        // Millisecond precision, same as what the store keeps.
        let sheet = MonthExpenses {
            month: data.month.into(),
            year: data.year,
            rows: data.rows,
            updated_at: Some(bson::DateTime::now()),
        };

        self.store.upsert(&sheet).await?;
        info!(
            year = sheet.year,
            month = %sheet.month,
            rows = sheet.rows.len(),
            "Saved month expenses"
        );

        Ok(sheet.into())
    }

    pub async fn get_month_expenses(
        &self,
        year: Year,
        month: &str,
    ) -> Result<Option<MonthExpensesResponse>> {
        debug!(year, month, "Fetching month expenses");
        let sheet = self.store.find_month(year, month).await?;
        Ok(sheet.map(MonthExpensesResponse::from))
    }

    pub async fn get_year_expenses(&self, year: Year) -> Result<Vec<MonthExpensesResponse>> {
        debug!(year, "Fetching year expenses");
        let sheets = self.store.find_year(year, MAX_MONTHS_PER_YEAR).await?;
        Ok(sheets.into_iter().map(MonthExpensesResponse::from).collect())
    }

    pub async fn delete_month_expenses(&self, year: Year, month: &str) -> Result<bool> {
        let deleted = self.store.delete_month(year, month).await?;
        if deleted {
            info!(year, month, "Deleted month expenses");
        } else {
            debug!(year, month, "Nothing to delete");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{ExpenseRow, MonthLabel};
    use crate::store::memory::InMemoryExpenseStore;

    fn service() -> ExpenseService {
        ExpenseService::new(Arc::new(InMemoryExpenseStore::default()))
    }

    fn row(id: i64, purpose: &str) -> ExpenseRow {
        ExpenseRow {
            id,
            purpose: purpose.to_string(),
            ..Default::default()
        }
    }

    fn sheet(month: &str, year: Year, rows: Vec<ExpenseRow>) -> MonthExpensesCreate {
        MonthExpensesCreate {
            month: MonthLabel::try_from(month.to_string()).unwrap(),
            year,
            rows,
        }
    }

    #[actix_web::test]
    async fn save_then_get_round_trips_rows_in_order() {
        let service = service();
        let rows = vec![row(2, "rent"), row(1, "groceries"), row(3, "fuel")];

        let saved = service
            .save_month_expenses(sheet("January", 2024, rows.clone()))
            .await
            .unwrap();
        let fetched = service
            .get_month_expenses(2024, "January")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.rows, rows);
        assert!(fetched.updated_at.is_some());
        assert_eq!(fetched, saved);
    }

    #[actix_web::test]
    async fn get_is_idempotent() {
        let service = service();
        service
            .save_month_expenses(sheet("February", 2024, vec![row(1, "school")]))
            .await
            .unwrap();

        let first = service.get_month_expenses(2024, "February").await.unwrap();
        let second = service.get_month_expenses(2024, "February").await.unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn save_replaces_rows_instead_of_merging() {
        let service = service();
        service
            .save_month_expenses(sheet("January", 2024, vec![row(1, "A"), row(2, "B")]))
            .await
            .unwrap();
        service
            .save_month_expenses(sheet("January", 2024, vec![row(3, "C")]))
            .await
            .unwrap();

        let fetched = service
            .get_month_expenses(2024, "January")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.rows, vec![row(3, "C")]);
        assert_eq!(service.get_year_expenses(2024).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn missing_month_is_none() {
        let service = service();

        assert_eq!(service.get_month_expenses(2024, "March").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn delete_then_get_is_none() {
        let service = service();
        service
            .save_month_expenses(sheet("January", 2024, vec![row(1, "A")]))
            .await
            .unwrap();

        assert!(service.delete_month_expenses(2024, "January").await.unwrap());
        assert_eq!(
            service.get_month_expenses(2024, "January").await.unwrap(),
            None
        );
    }

    #[actix_web::test]
    async fn deleting_missing_month_returns_false() {
        let service = service();

        assert!(!service.delete_month_expenses(2024, "July").await.unwrap());
    }

    #[actix_web::test]
    async fn year_lookup_only_returns_that_year() {
        let service = service();
        service
            .save_month_expenses(sheet("January", 2024, vec![row(1, "2024")]))
            .await
            .unwrap();
        service
            .save_month_expenses(sheet("January", 2025, vec![row(1, "2025")]))
            .await
            .unwrap();

        let year = service.get_year_expenses(2024).await.unwrap();

        assert_eq!(year.len(), 1);
        assert_eq!(year[0].year, 2024);
        assert_eq!(year[0].rows, vec![row(1, "2024")]);
    }

    #[actix_web::test]
    async fn empty_year_is_an_empty_list() {
        let service = service();

        assert!(service.get_year_expenses(1999).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn year_lookup_is_capped_at_twelve_sheets() {
        let service = service();
        for n in 0..14 {
            service
                .save_month_expenses(sheet(&format!("Month {n}"), 2024, vec![]))
                .await
                .unwrap();
        }

        let year = service.get_year_expenses(2024).await.unwrap();

        assert_eq!(year.len(), MAX_MONTHS_PER_YEAR as usize);
    }
}
