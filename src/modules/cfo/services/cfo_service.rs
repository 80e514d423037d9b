use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{AppError, Result};
use crate::modules::cfo::models::{CategoriesFixture, CreditDebit, DashboardView, FinanceData, Transaction};
use crate::modules::cfo::repositories::{FixtureSource, CATEGORIES_FILE, FINANCE_FILE};
use crate::modules::cfo::services::{
    build_dashboard, creditor_report, search_transactions, CreditorReport, DashboardQuery,
    ExpenseQuery, TransactionQuery, TransactionSearchResult,
};

/// CFO data routes over the JSON fixtures
pub struct CfoService {
    fixtures: Arc<dyn FixtureSource>,
}

impl CfoService {
    pub fn new(fixtures: Arc<dyn FixtureSource>) -> Self {
        Self { fixtures }
    }

    /// `finance.json` byte for byte
    pub async fn raw_finance(&self) -> Result<Vec<u8>> {
        self.fixtures.read(FINANCE_FILE).await
    }

    /// `categories.json` byte for byte
    pub async fn raw_categories(&self) -> Result<Vec<u8>> {
        self.fixtures.read(CATEGORIES_FILE).await
    }

    pub async fn finance(&self) -> Result<FinanceData> {
        self.parse(FINANCE_FILE).await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        let fixture: CategoriesFixture = self.parse(CATEGORIES_FILE).await?;
        Ok(fixture.all_transactions)
    }

    pub async fn dashboard(&self, query: DashboardQuery) -> Result<DashboardView> {
        let data = self.finance().await?;
        build_dashboard(&data, query)
    }

    pub async fn search(&self, query: &TransactionQuery) -> Result<TransactionSearchResult> {
        let transactions = self.transactions().await?;
        search_transactions(&transactions, query)
    }

    /// `{"expenses": [...]}` with the DEBIT rows exactly as the fixture has them
    pub async fn raw_expenses(&self) -> Result<Value> {
        let fixture: Value = self.parse(CATEGORIES_FILE).await?;

        let expenses: Vec<Value> = fixture
            .get("all_transactions")
            .and_then(Value::as_array)
            .ok_or_else(|| AppError::internal("categories.json has no all_transactions array"))?
            .iter()
            .filter(|tx| {
                tx.get("creditdebitindicator").and_then(Value::as_str)
                    == Some(CreditDebit::Debit.as_str())
            })
            .cloned()
            .collect();

        Ok(serde_json::json!({ "expenses": expenses }))
    }

    pub async fn creditors(&self, query: &ExpenseQuery) -> Result<CreditorReport> {
        self.creditors_at(query, Utc::now().date_naive()).await
    }

    /// Creditor breakdown with "last month" measured from `today`
    pub async fn creditors_at(&self, query: &ExpenseQuery, today: NaiveDate) -> Result<CreditorReport> {
        let transactions = self.transactions().await?;
        creditor_report(transactions, query, today)
    }

    pub async fn is_ready(&self) -> bool {
        self.fixtures.is_available().await
    }

    async fn parse<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let bytes = self.fixtures.read(name).await?;
        // A broken fixture is our fault, not the caller's
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::internal(format!("{} is malformed: {}", name, e)))
    }
}
