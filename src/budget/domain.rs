use serde::Deserialize;

use crate::{
    Error,
    api_client::zero_if_null,
    category::Category,
    form_fields::empty_as_none,
    month::MonthYear,
    transaction_type::TransactionType,
};

/// A category's spending limit for a month and how much of it has been spent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category_name: String,
    pub category_id: i64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub limit_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub spent_amount: f64,
    /// Spent as a percentage of the limit, may exceed 100.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub percentage: f64,
}

impl Budget {
    pub fn remaining(&self) -> f64 {
        self.limit_amount - self.spent_amount
    }

    pub fn is_over_budget(&self) -> bool {
        self.percentage >= 100.0
    }

    /// The width of the progress bar, capped at 100.
    pub fn bar_width(&self) -> f64 {
        self.percentage.min(100.0)
    }
}

/// The colour of a budget's progress bar and percentage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    Warning,
    Critical,
    Over,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            BudgetStatus::Over
        } else if percentage >= 85.0 {
            BudgetStatus::Critical
        } else if percentage >= 70.0 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }

    pub fn bar_style(self) -> &'static str {
        match self {
            BudgetStatus::Ok => "bg-green-500",
            BudgetStatus::Warning => "bg-yellow-500",
            BudgetStatus::Critical => "bg-orange-500",
            BudgetStatus::Over => "bg-red-500",
        }
    }

    pub fn text_style(self) -> &'static str {
        match self {
            BudgetStatus::Ok => "text-green-600 dark:text-green-400",
            BudgetStatus::Warning => "text-yellow-600 dark:text-yellow-400",
            BudgetStatus::Critical => "text-orange-600 dark:text-orange-400",
            BudgetStatus::Over => "text-red-600 dark:text-red-400",
        }
    }
}

/// The form data for setting a category's budget.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
    pub amount: f64,
    pub month: u8,
    pub year: i32,
}

/// A validated budget ready to be sent to the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewBudget {
    pub category_id: i64,
    pub amount: f64,
    pub month: MonthYear,
}

impl NewBudget {
    /// Validate a budget form against the user's `categories`.
    ///
    /// # Errors
    ///
    /// Returns an error if no category was chosen, the category is not an
    /// expense category, or the amount is not greater than zero.
    pub fn from_form(
        form: &BudgetForm,
        month: MonthYear,
        categories: &[Category],
    ) -> Result<Self, Error> {
        let category_id = form.category_id.ok_or(Error::EmptyField("Category"))?;

        let is_expense_category = categories.iter().any(|category| {
            category.id == category_id && category.category_type == TransactionType::Expense
        });
        if !is_expense_category {
            return Err(Error::CategoryTypeMismatch);
        }

        if !form.amount.is_finite() || form.amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(Self {
            category_id,
            amount: form.amount,
            month,
        })
    }
}
