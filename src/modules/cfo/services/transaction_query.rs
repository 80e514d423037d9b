//! Filtering, sorting and paging of the transaction list.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{contains_ignore_case, paginate, Page, Result, SortOrder};
use crate::modules::cfo::models::{CreditDebit, Transaction};

/// Column a transaction list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Date,
    Description,
    ContragentName,
    DebtorpartyName,
    CreditorpartyName,
    Category,
    CorrectedAmount,
    Creditdebitindicator,
    Flow,
    TId,
}

/// Predicates applied before sorting; every set field must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub indicator: Option<CreditDebit>,
    pub category: Option<String>,
    pub search: String,
}

impl TransactionFilters {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.date_from.is_some_and(|from| tx.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| tx.date > to) {
            return false;
        }
        if self.indicator.is_some_and(|indicator| tx.creditdebitindicator != indicator) {
            return false;
        }
        if self.category.as_deref().is_some_and(|category| tx.category != category) {
            return false;
        }

        let needle = self.search.trim();
        needle.is_empty()
            || contains_ignore_case(&tx.category, needle)
            || contains_ignore_case(tx.description.as_deref().unwrap_or_default(), needle)
            || tx.corrected_amount.normalize().to_string().contains(needle)
    }
}

/// GET /api/cfo/transactions/search query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub indicator: Option<CreditDebit>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl TransactionQuery {
    pub fn filters(&self) -> TransactionFilters {
        TransactionFilters {
            date_from: self.date_from,
            date_to: self.date_to,
            indicator: self.indicator,
            category: self.category.clone().filter(|c| !c.is_empty()),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Filtered page plus the category choices for the filter bar
#[derive(Debug, Clone, Serialize)]
pub struct TransactionSearchResult {
    pub categories: Vec<String>,
    pub transactions: Page<Transaction>,
}

pub fn filter_transactions(transactions: &[Transaction], filters: &TransactionFilters) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filters.matches(tx))
        .cloned()
        .collect()
}

/// Case-insensitive first, raw byte order only to break ties. Missing text
/// counts as empty.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

fn compare_by(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Description => compare_text(a.description.as_deref(), b.description.as_deref()),
        SortField::ContragentName => {
            compare_text(a.contragent_name.as_deref(), b.contragent_name.as_deref())
        }
        SortField::DebtorpartyName => {
            compare_text(a.debtorparty_name.as_deref(), b.debtorparty_name.as_deref())
        }
        SortField::CreditorpartyName => {
            compare_text(a.creditorparty_name.as_deref(), b.creditorparty_name.as_deref())
        }
        SortField::Category => compare_text(Some(&a.category), Some(&b.category)),
        SortField::CorrectedAmount => a.corrected_amount.cmp(&b.corrected_amount),
        SortField::Creditdebitindicator => a
            .creditdebitindicator
            .as_str()
            .cmp(b.creditdebitindicator.as_str()),
        SortField::Flow => compare_text(a.flow.as_deref(), b.flow.as_deref()),
        SortField::TId => a.t_id.cmp(&b.t_id),
    }
}

/// Stable sort; equal keys keep their input order in both directions
pub fn sort_transactions(transactions: &mut [Transaction], field: SortField, order: SortOrder) {
    transactions.sort_by(|a, b| order.apply(compare_by(a, b, field)));
}

/// Distinct categories in first-seen order
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for tx in transactions {
        if !categories.iter().any(|c| *c == tx.category) {
            categories.push(tx.category.clone());
        }
    }
    categories
}

/// Filter, sort, then page. Without `page` or `per_page` everything comes
/// back on a single page.
pub fn search_transactions(transactions: &[Transaction], query: &TransactionQuery) -> Result<TransactionSearchResult> {
    let categories = distinct_categories(transactions);

    let mut matching = filter_transactions(transactions, &query.filters());
    sort_transactions(
        &mut matching,
        query.sort.unwrap_or_default(),
        query.order.unwrap_or_default(),
    );

    let transactions = match (query.page, query.per_page) {
        (None, None) => Page::single(matching),
        (page, per_page) => paginate(matching, page.unwrap_or(1), per_page.unwrap_or(50))?,
    };

    Ok(TransactionSearchResult {
        categories,
        transactions,
    })
}
