//! Period aggregation for the CFO dashboard.
//!
//! Everything here is a pure function of the finance summary so the same
//! numbers come out no matter who asks.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::cfo::models::{
    CategoryAmount, CategoryByMonth, CategoryRow, ChartPoint, CreditDebit, DashboardView,
    FinanceData, KpiTotals,
};
use crate::modules::cfo::services::percent_of;

/// Year shown when the summary lists no periods at all
pub const FALLBACK_YEAR: i32 = 2025;

/// GET /api/cfo/dashboard query; `month = 0` selects the whole year
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Distinct years, and `0` followed by the distinct months, in first-seen order
pub fn filter_options(data: &FinanceData) -> (Vec<i32>, Vec<u32>) {
    let mut years = Vec::new();
    let mut months = vec![0];

    for period in &data.filter_date {
        if !years.contains(&period.year) {
            years.push(period.year);
        }
        if period.month != 0 && !months.contains(&period.month) {
            months.push(period.month);
        }
    }

    (years, months)
}

/// Whole-year rows for month 0, otherwise exactly that month
pub fn matches_period(row_year: i32, row_month: u32, year: i32, month: u32) -> bool {
    row_year == year && row_month == month
}

/// Revenue of the period; the whole year sums every month row of that year
pub fn revenue_total(data: &FinanceData, year: i32, month: u32) -> Decimal {
    if month == 0 {
        return data
            .revenue_by_month
            .iter()
            .filter(|row| row.year == year)
            .map(|row| row.revenue)
            .sum();
    }

    data.revenue_by_month
        .iter()
        .find(|row| row.year == year && row.month == month)
        .map(|row| row.revenue)
        .unwrap_or_default()
}

/// Group-sum amounts by category, keeping first-seen order
fn group_by_category<'a>(rows: impl Iterator<Item = &'a CategoryByMonth>) -> Vec<(String, Decimal, CreditDebit)> {
    let mut groups: Vec<(String, Decimal, CreditDebit)> = Vec::new();

    for row in rows {
        match groups.iter_mut().find(|(category, _, _)| *category == row.category) {
            Some((_, amount, _)) => *amount += row.corrected_amount,
            None => groups.push((
                row.category.clone(),
                row.corrected_amount,
                row.creditdebitindicator,
            )),
        }
    }

    groups
}

/// Category table with each category's share of `revenue`
pub fn category_table(data: &FinanceData, year: i32, month: u32, revenue: Decimal) -> Vec<CategoryRow> {
    let rows = data
        .category_by_month
        .iter()
        .filter(|row| matches_period(row.year, row.month, year, month));

    group_by_category(rows)
        .into_iter()
        .map(|(category, amount, creditdebitindicator)| CategoryRow {
            category,
            amount,
            percent: if revenue > Decimal::ZERO {
                percent_of(amount, revenue)
            } else {
                Decimal::ZERO
            },
            creditdebitindicator,
        })
        .collect()
}

/// Pie slices for one side of the ledger
pub fn category_totals(
    data: &FinanceData,
    year: i32,
    month: u32,
    indicator: CreditDebit,
) -> Vec<CategoryAmount> {
    let rows = data.category_by_month.iter().filter(|row| {
        row.creditdebitindicator == indicator && matches_period(row.year, row.month, year, month)
    });

    group_by_category(rows)
        .into_iter()
        .map(|(category, amount, _)| CategoryAmount { category, amount })
        .collect()
}

/// One bar per revenue month of `year`; profit falls back to revenue minus costs
pub fn bar_chart(data: &FinanceData, year: i32) -> Vec<ChartPoint> {
    data.revenue_by_month
        .iter()
        .filter(|row| row.year == year)
        .map(|row| {
            let costs = data
                .costs_by_month
                .iter()
                .find(|c| c.year == year && c.month == row.month)
                .map(|c| c.costs)
                .unwrap_or_default();

            let profit = data
                .profit_by_month
                .iter()
                .find(|p| p.year == year && p.month == row.month)
                .map(|p| p.profit)
                .unwrap_or(row.revenue - costs);

            let dividends = data
                .dividends_by_month
                .iter()
                .find(|d| d.year == year && d.month == row.month)
                .map(|d| d.dividends)
                .unwrap_or_default();

            ChartPoint {
                year: row.year,
                month: row.month,
                revenue: row.revenue,
                costs,
                profit,
                dividends,
            }
        })
        .collect()
}

/// Assemble the dashboard for the requested period.
///
/// A missing year falls back to the first listed year, a missing month to
/// the whole year.
pub fn build_dashboard(data: &FinanceData, query: DashboardQuery) -> Result<DashboardView> {
    let month = query.month.unwrap_or(0);
    if month > 12 {
        return Err(AppError::validation("month must be between 0 and 12"));
    }

    let (years, months) = filter_options(data);
    let year = query
        .year
        .or_else(|| years.first().copied())
        .unwrap_or(FALLBACK_YEAR);

    let revenue = revenue_total(data, year, month);

    Ok(DashboardView {
        categories: category_table(data, year, month, revenue),
        income: category_totals(data, year, month, CreditDebit::Credit),
        expenses: category_totals(data, year, month, CreditDebit::Debit),
        chart: bar_chart(data, year),
        totals: KpiTotals {
            total_revenue: data.total_revenue,
            total_costs: data.total_costs,
            total_profit: data.total_profit,
            total_dividends: data.total_dividends,
            profitability: data.profitability,
        },
        revenue_total: revenue,
        years,
        months,
        year,
        month,
    })
}
