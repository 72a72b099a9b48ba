//! Monthly spending limits for expense categories.

mod api;
mod delete;
mod domain;
mod page;
mod set;

pub use api::{delete_budget, get_budgets, save_budget};
pub use delete::delete_budget_endpoint;
pub use domain::{Budget, BudgetForm, BudgetStatus, NewBudget};
pub use page::get_budgets_page;
pub use set::{BudgetPageQuery, get_set_budget_page, set_budget_endpoint};
