pub mod cfo_service;
pub mod dashboard;
pub mod expense_report;
pub mod transaction_query;

pub use cfo_service::CfoService;
pub use dashboard::{build_dashboard, DashboardQuery};
pub use expense_report::{
    creditor_breakdown, creditor_report, last_month_range, CreditorReport, CreditorShare,
    ExpenseQuery, PeriodMode, UNKNOWN_CREDITOR,
};
pub use transaction_query::{
    search_transactions, sort_transactions, SortField, TransactionFilters, TransactionQuery,
    TransactionSearchResult,
};

use rust_decimal::{Decimal, RoundingStrategy};

/// `amount` as a percentage of `total`, two decimal places; zero when `total` is zero
pub fn percent_of(amount: Decimal, total: Decimal) -> Decimal {
    amount
        .checked_div(total)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_default()
}
