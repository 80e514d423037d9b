use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::cfo::models::CreditDebit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDate {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByMonth {
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostsByMonth {
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub costs: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitByMonth {
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendsByMonth {
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub dividends: Decimal,
}

/// Category total for one month; `month == 0` rows hold the whole year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryByMonth {
    pub category: String,
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub corrected_amount: Decimal,
    pub creditdebitindicator: CreditDebit,
}

/// Contents of `finance.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceData {
    #[serde(default)]
    pub filter_date: Vec<FilterDate>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub total_revenue: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub total_costs: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub total_profit: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub total_dividends: Decimal,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub profitability: Decimal,
    #[serde(default)]
    pub revenue_by_month: Vec<RevenueByMonth>,
    #[serde(default)]
    pub costs_by_month: Vec<CostsByMonth>,
    #[serde(default)]
    pub profit_by_month: Vec<ProfitByMonth>,
    #[serde(default)]
    pub dividends_by_month: Vec<DividendsByMonth>,
    #[serde(default)]
    pub category_by_month: Vec<CategoryByMonth>,
}

/// Headline figures, passed through from the fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTotals {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_profit: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_dividends: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub profitability: Decimal,
}

/// Row of the category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    /// Share of the period revenue, two decimal places
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percent: Decimal,
    pub creditdebitindicator: CreditDebit,
}

/// Slice of an income or expense pie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

/// Month bar of the revenue chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: i32,
    pub month: u32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub costs: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub profit: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub dividends: Decimal,
}

/// Everything the dashboard page renders for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub year: i32,
    pub month: u32,
    pub totals: KpiTotals,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub revenue_total: Decimal,
    pub categories: Vec<CategoryRow>,
    pub income: Vec<CategoryAmount>,
    pub expenses: Vec<CategoryAmount>,
    pub chart: Vec<ChartPoint>,
}
