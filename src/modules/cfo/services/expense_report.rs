//! Expense detail: the DEBIT side of the ledger broken down by creditor.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::cfo::models::{CreditDebit, Transaction};
use crate::modules::cfo::services::percent_of;
use crate::modules::cfo::services::transaction_query::distinct_categories;

/// Label for expenses without a creditor
pub const UNKNOWN_CREDITOR: &str = "Не указан";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMode {
    #[default]
    LastMonth,
    AllTime,
}

/// GET /api/cfo/expenses/creditors query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseQuery {
    #[serde(default)]
    pub period: PeriodMode,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorShare {
    pub creditor: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorReport {
    pub period: PeriodMode,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
    pub creditors: Vec<CreditorShare>,
    /// Every expense category, whatever the period and category filter
    pub categories: Vec<String>,
}

/// First and last day of the calendar month before `today`
pub fn last_month_range(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::internal(format!("No first day for {}-{}", year, month)))?;
    let this_month = today
        .with_day(1)
        .ok_or_else(|| AppError::internal(format!("No first day of month for {}", today)))?;
    let last = this_month
        .pred_opt()
        .ok_or_else(|| AppError::internal(format!("No day before {}", this_month)))?;

    Ok((first, last))
}

/// DEBIT transactions only
pub fn expenses(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|tx| tx.creditdebitindicator == CreditDebit::Debit)
        .collect()
}

/// Effective date bounds for the query; explicit dates override last-month bounds
pub fn period_bounds(query: &ExpenseQuery, today: NaiveDate) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    match query.period {
        PeriodMode::AllTime => Ok((None, None)),
        PeriodMode::LastMonth => {
            let (first, last) = last_month_range(today)?;
            Ok((
                Some(query.date_from.unwrap_or(first)),
                Some(query.date_to.unwrap_or(last)),
            ))
        }
    }
}

/// Group-sum by creditor, largest first
pub fn creditor_breakdown(expenses: &[Transaction]) -> Vec<CreditorShare> {
    if expenses.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for tx in expenses {
        let creditor = tx
            .creditorparty_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_CREDITOR);

        match groups.iter_mut().find(|(name, _)| name == creditor) {
            Some((_, amount)) => *amount += tx.corrected_amount,
            None => groups.push((creditor.to_string(), tx.corrected_amount)),
        }
    }

    let total: Decimal = groups.iter().map(|(_, amount)| *amount).sum();

    let mut shares: Vec<CreditorShare> = groups
        .into_iter()
        .map(|(creditor, amount)| CreditorShare {
            percent: percent_of(amount, total),
            creditor,
            amount,
        })
        .collect();

    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

/// Expenses for the requested period and category with their creditor breakdown
pub fn creditor_report(
    transactions: Vec<Transaction>,
    query: &ExpenseQuery,
    today: NaiveDate,
) -> Result<CreditorReport> {
    let (date_from, date_to) = period_bounds(query, today)?;
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let debits = expenses(transactions);
    let categories = distinct_categories(&debits);

    let selected: Vec<Transaction> = debits
        .into_iter()
        .filter(|tx| date_from.is_none_or(|from| tx.date >= from))
        .filter(|tx| date_to.is_none_or(|to| tx.date <= to))
        .filter(|tx| category.is_none_or(|c| tx.category == c))
        .collect();

    let creditors = creditor_breakdown(&selected);
    let total = creditors.iter().map(|share| share.amount).sum();

    Ok(CreditorReport {
        period: query.period,
        date_from,
        date_to,
        total,
        creditors,
        categories,
    })
}
