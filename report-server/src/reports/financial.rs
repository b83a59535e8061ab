//! Financial summary: revenue vs expenses over one range

use shared::models::{Expense, Transaction};
use shared::report::{ExpenseSummary, FinancialSummary, ProfitSummary, RevenueSummary};

use crate::analytics::money::to_f64;
use crate::analytics::{Aggregator, RangePolicy, metrics};
use crate::store::{ExpenseFilter, TransactionFilter};

use super::{RangeQuery, ReportEngine, ReportError};

impl ReportEngine {
    /// GET /reports/financial-summary
    ///
    /// Transaction and expense queries fan out concurrently; either failing
    /// fails the whole report.
    pub async fn financial_summary(
        &self,
        query: &RangeQuery,
    ) -> Result<FinancialSummary, ReportError> {
        let range = self.resolve(query, RangePolicy::Today)?;
        let (transactions, expenses) = tokio::try_join!(
            self.completed_transactions(range),
            self.active_expenses(range)
        )?;

        let tx_filter = TransactionFilter::completed(range);
        let revenue = Aggregator::new(|_: &Transaction| ())
            .filter(|t| tx_filter.matches(t))
            .sum("total", |t| t.total)
            .run(&transactions);

        let ex_filter = ExpenseFilter::active(range);
        let spent = Aggregator::new(|_: &Expense| ())
            .filter(|e| ex_filter.matches(e))
            .sum("total", |e| e.amount)
            .run(&expenses);

        let revenue_total = revenue.total("total");
        let expense_total = spent.total("total");
        let gross = metrics::gross_profit(revenue_total, expense_total);
        let margin = metrics::profit_margin(gross, revenue_total);

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            transactions = transactions.len(),
            expenses = expenses.len(),
            "financial summary computed"
        );

        Ok(FinancialSummary {
            revenue: RevenueSummary {
                total: to_f64(revenue_total),
                orders: revenue.count(),
            },
            expenses: ExpenseSummary {
                total: to_f64(expense_total),
                count: spent.count(),
            },
            profit: ProfitSummary {
                gross: to_f64(gross),
                margin: to_f64(margin),
            },
        })
    }
}
