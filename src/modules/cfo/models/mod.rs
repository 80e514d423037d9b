pub mod finance;
pub mod transaction;

pub use finance::{
    CategoryAmount, CategoryByMonth, CategoryRow, ChartPoint, CostsByMonth, DashboardView,
    DividendsByMonth, FilterDate, FinanceData, KpiTotals, ProfitByMonth, RevenueByMonth,
};
pub use transaction::{CategoriesFixture, CreditDebit, Transaction};
