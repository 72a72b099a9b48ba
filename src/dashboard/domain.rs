//! The dashboard summary returned by the API and the bar sizes derived from it.

use serde::Deserialize;

use crate::{
    account::{Account, total_balance},
    api_client::zero_if_null,
    transaction::Transaction,
};

/// The fill colours of the top category bars, used in order and then repeated.
pub(super) const CATEGORY_COLORS: [&str; 5] = [
    "bg-blue-500",
    "bg-amber-500",
    "bg-emerald-500",
    "bg-violet-500",
    "bg-red-500",
];

/// The month summary behind the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_income: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_expense: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_result: f64,
    #[serde(default)]
    pub top_categories: Vec<TopCategory>,
    #[serde(default)]
    pub daily_expenses: Vec<DailyExpense>,
    #[serde(default)]
    pub net_worth_data: Option<NetWorthData>,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    #[serde(default)]
    pub upcoming_expenses: Vec<UpcomingExpense>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCategory {
    pub category_name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
}

/// The amount spent on one day of the month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyExpense {
    /// The day as the API labels it, already in "dd/mm" form.
    pub date: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthData {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_balance: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_assets: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub net_worth: f64,
    /// The change in net worth since last month, as a percentage.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub percentage_change: f64,
}

impl NetWorthData {
    /// The net worth reported by the API, or the account balances alone when the API left it out.
    pub fn or_account_total(net_worth: Option<NetWorthData>, accounts: &[Account]) -> Self {
        net_worth.unwrap_or_else(|| {
            let total = total_balance(accounts);

            Self {
                total_balance: total,
                total_assets: 0.0,
                net_worth: total,
                percentage_change: 0.0,
            }
        })
    }
}

/// A recurring expense that is still to be paid this month.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExpense {
    pub id: i64,
    pub description: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: f64,
    #[serde(default)]
    pub due_day: Option<u8>,
}

/// The widths of the income and expense bars, relative to the larger of the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowBars {
    pub income_percent: f64,
    pub expense_percent: f64,
}

impl FlowBars {
    pub fn new(income: f64, expense: f64) -> Self {
        let max = income.max(expense);

        if max > 0.0 {
            Self {
                income_percent: income / max * 100.0,
                expense_percent: expense / max * 100.0,
            }
        } else {
            Self {
                income_percent: 0.0,
                expense_percent: 0.0,
            }
        }
    }
}

/// Each value as a percentage of the largest value, or all zeros when nothing is positive.
pub fn relative_to_largest(values: impl Iterator<Item = f64> + Clone) -> Vec<f64> {
    let largest = values.clone().fold(0.0, f64::max);

    values
        .map(|value| {
            if largest > 0.0 {
                value / largest * 100.0
            } else {
                0.0
            }
        })
        .collect()
}
