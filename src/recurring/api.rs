//! REST API calls for recurring transactions.

use serde::Serialize;

use crate::{
    Error,
    api_client::ApiClient,
    category::CategoryRef,
    month::MonthYear,
    recurring::{MONTHLY, NewRecurring, RecurringTransaction},
    transaction_type::TransactionType,
};

const RECURRING_PATH: &str = "/recurring";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecurringRequest<'a> {
    description: &'a str,
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: Option<CategoryRef>,
    due_day: u8,
    frequency: &'static str,
}

impl<'a> From<&'a NewRecurring> for RecurringRequest<'a> {
    fn from(recurring: &'a NewRecurring) -> Self {
        Self {
            description: &recurring.description,
            amount: recurring.amount,
            transaction_type: recurring.transaction_type,
            category: recurring.category_id.map(|id| CategoryRef { id }),
            due_day: recurring.due_day,
            frequency: MONTHLY,
        }
    }
}

#[derive(Serialize)]
struct LaunchRequest {
    year: i32,
    month: u8,
}

pub async fn get_recurring_transactions(
    api: &ApiClient,
    token: &str,
) -> Result<Vec<RecurringTransaction>, Error> {
    Ok(api.get(token, RECURRING_PATH).await?)
}

pub async fn create_recurring(
    api: &ApiClient,
    token: &str,
    recurring: &NewRecurring,
) -> Result<(), Error> {
    Ok(api
        .post(token, RECURRING_PATH, &RecurringRequest::from(recurring))
        .await?)
}

pub async fn update_recurring(
    api: &ApiClient,
    token: &str,
    id: i64,
    recurring: &NewRecurring,
) -> Result<(), Error> {
    Ok(api
        .put(
            token,
            &format!("{RECURRING_PATH}/{id}"),
            &RecurringRequest::from(recurring),
        )
        .await?)
}

pub async fn delete_recurring(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{RECURRING_PATH}/{id}")).await?)
}

/// Create the transaction for `month` from the recurring transaction with `id`.
pub async fn launch_recurring(
    api: &ApiClient,
    token: &str,
    id: i64,
    month: MonthYear,
) -> Result<(), Error> {
    let request = LaunchRequest {
        year: month.year(),
        month: month.month_number(),
    };

    Ok(api
        .post(
            token,
            &format!("{RECURRING_PATH}/{id}/create-transaction"),
            &request,
        )
        .await?)
}
