//! REST API calls for budgets.

use serde::Serialize;

use crate::{
    Error,
    api_client::ApiClient,
    budget::{Budget, NewBudget},
    month::MonthYear,
};

const BUDGETS_PATH: &str = "/budgets";

#[derive(Serialize)]
struct MonthParams {
    month: u8,
    year: i32,
}

impl From<MonthYear> for MonthParams {
    fn from(month: MonthYear) -> Self {
        Self {
            month: month.month_number(),
            year: month.year(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRequest {
    category_id: i64,
    amount: f64,
    month: u8,
    year: i32,
}

/// Get the budgets and spending for `month`.
pub async fn get_budgets(api: &ApiClient, token: &str, month: MonthYear) -> Result<Vec<Budget>, Error> {
    Ok(api
        .get_with_query(token, BUDGETS_PATH, &MonthParams::from(month))
        .await?)
}

/// Create the budget for the category and month, or replace it if it already exists.
pub async fn save_budget(api: &ApiClient, token: &str, budget: &NewBudget) -> Result<(), Error> {
    let request = BudgetRequest {
        category_id: budget.category_id,
        amount: budget.amount,
        month: budget.month.month_number(),
        year: budget.month.year(),
    };

    Ok(api.post(token, BUDGETS_PATH, &request).await?)
}

pub async fn delete_budget(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{BUDGETS_PATH}/{id}")).await?)
}
