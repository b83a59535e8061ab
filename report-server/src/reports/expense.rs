//! Expense reports (active expenses only, keyed on the business date)

use shared::models::{Expense, ExpenseCategory};
use shared::report::{
    ExpenseCategoryTotal, ExpenseOverview, ExpensePoint, ExpenseSubcategoryTotal,
    StaffCostProjection,
};

use crate::analytics::metrics::{self, Projection};
use crate::analytics::money::to_f64;
use crate::analytics::{Aggregator, RangePolicy, TimeBucket};
use crate::store::ExpenseFilter;

use super::{RangeQuery, ReportEngine, ReportError};

impl ReportEngine {
    /// GET /reports/expense-overview
    ///
    /// Expense and staffing queries run concurrently.
    pub async fn expense_overview(
        &self,
        query: &RangeQuery,
    ) -> Result<ExpenseOverview, ReportError> {
        let range = self.resolve(query, RangePolicy::Today)?;
        let (expenses, staff_daily) =
            tokio::try_join!(self.active_expenses(range), self.staff_daily_cost())?;
        let filter = ExpenseFilter::active(range);

        let totals = Aggregator::new(|_: &Expense| ())
            .filter(|e| filter.matches(e))
            .sum("amount", |e| e.amount)
            .run(&expenses);

        let total = totals.total("amount");
        let days = range.days_in_range();
        let averages = Projection::from_daily(metrics::daily_average(total, days));
        let staff = Projection::from_daily(staff_daily);

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            days,
            records = expenses.len(),
            "expense overview computed"
        );

        Ok(ExpenseOverview {
            total_expenses: to_f64(total),
            count: totals.count(),
            days_in_range: days,
            daily_average: to_f64(averages.daily),
            weekly_average: to_f64(averages.weekly),
            monthly_average: to_f64(averages.monthly),
            staff_costs: StaffCostProjection {
                daily: to_f64(staff.daily),
                monthly: to_f64(staff.monthly),
                yearly: to_f64(staff.yearly),
            },
        })
    }

    /// GET /reports/expenses-by-category
    pub async fn expenses_by_category(
        &self,
        query: &RangeQuery,
    ) -> Result<Vec<ExpenseCategoryTotal>, ReportError> {
        let range = self.resolve(query, RangePolicy::Today)?;
        let expenses = self.active_expenses(range).await?;
        let filter = ExpenseFilter::active(range);

        let rows = Aggregator::new(|e: &Expense| e.category)
            .filter(|e| filter.matches(e))
            .sum("total", |e| e.amount)
            .run(&expenses)
            .sort_by_sum_desc("total");

        tracing::debug!(
            records = expenses.len(),
            categories = rows.len(),
            "expenses by category computed"
        );

        Ok(rows
            .rows()
            .iter()
            .map(|row| ExpenseCategoryTotal {
                category: ExpenseCategory::as_str(&row.key).to_string(),
                total: to_f64(row.sum("total")),
                count: row.count,
            })
            .collect())
    }

    /// GET /reports/expenses-over-time
    pub async fn expenses_over_time(
        &self,
        query: &RangeQuery,
        bucket: TimeBucket,
    ) -> Result<Vec<ExpensePoint>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let expenses = self.active_expenses(range).await?;
        let filter = ExpenseFilter::active(range);
        let calendar = self.calendar();

        let rows = Aggregator::new(|e: &Expense| calendar.date_key(e.date, bucket))
            .filter(|e| filter.matches(e))
            .sum("total", |e| e.amount)
            .run(&expenses)
            .sort_by_key();

        tracing::debug!(
            bucket = %bucket,
            records = expenses.len(),
            buckets = rows.len(),
            "expenses over time computed"
        );

        Ok(rows
            .into_rows()
            .into_iter()
            .map(|row| ExpensePoint {
                total: to_f64(row.sum("total")),
                count: row.count,
                period: row.key,
            })
            .collect())
    }

    /// GET /reports/top-expense-categories
    pub async fn top_expense_categories(
        &self,
        query: &RangeQuery,
        limit: usize,
    ) -> Result<Vec<ExpenseSubcategoryTotal>, ReportError> {
        let range = self.resolve(query, self.trailing())?;
        let expenses = self.active_expenses(range).await?;
        let filter = ExpenseFilter::active(range);

        let rows = Aggregator::new(|e: &Expense| (e.category, e.subcategory.clone()))
            .filter(|e| filter.matches(e))
            .sum("total", |e| e.amount)
            .run(&expenses)
            .sort_by_sum_desc("total")
            .limit(limit);

        tracing::debug!(
            records = expenses.len(),
            limit,
            returned = rows.len(),
            "top expense categories computed"
        );

        Ok(rows
            .into_rows()
            .into_iter()
            .map(|row| {
                let total = to_f64(row.sum("total"));
                let (category, subcategory) = row.key;
                ExpenseSubcategoryTotal {
                    category: category.as_str().to_string(),
                    subcategory,
                    total_amount: total,
                    count: row.count,
                }
            })
            .collect())
    }
}
