//! REST API calls for transactions.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    api_client::{ApiClient, iso_date},
    category::CategoryRef,
    month::MonthYear,
    transaction::{NewTransaction, Transaction, TransactionSource},
    transaction_type::TransactionType,
};

const TRANSACTIONS_PATH: &str = "/transactions";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsQuery {
    month: u8,
    year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct SourceRef {
    id: i64,
}

/// The request body for creating or replacing a transaction.
///
/// A null account and credit card leaves the source of an existing
/// transaction unchanged.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest<'a> {
    description: &'a str,
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    #[serde(with = "iso_date")]
    date: Date,
    category: Option<CategoryRef>,
    account: Option<SourceRef>,
    credit_card: Option<SourceRef>,
}

impl<'a> From<&'a NewTransaction> for TransactionRequest<'a> {
    fn from(transaction: &'a NewTransaction) -> Self {
        let (account, credit_card) = match transaction.source {
            Some(TransactionSource::Account(id)) => (Some(SourceRef { id }), None),
            Some(TransactionSource::CreditCard(id)) => (None, Some(SourceRef { id })),
            None => (None, None),
        };

        Self {
            description: &transaction.description,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            date: transaction.date,
            category: transaction.category_id.map(|id| CategoryRef { id }),
            account,
            credit_card,
        }
    }
}

/// Get the transactions in `month`, optionally only those in the category with `category_id`.
pub async fn get_transactions(
    api: &ApiClient,
    token: &str,
    month: MonthYear,
    category_id: Option<i64>,
) -> Result<Vec<Transaction>, Error> {
    let query = TransactionsQuery {
        month: month.month_number(),
        year: month.year(),
        category_id,
    };

    Ok(api.get_with_query(token, TRANSACTIONS_PATH, &query).await?)
}

pub async fn create_transaction(
    api: &ApiClient,
    token: &str,
    transaction: &NewTransaction,
) -> Result<(), Error> {
    Ok(api
        .post(token, TRANSACTIONS_PATH, &TransactionRequest::from(transaction))
        .await?)
}

pub async fn update_transaction(
    api: &ApiClient,
    token: &str,
    id: i64,
    transaction: &NewTransaction,
) -> Result<(), Error> {
    Ok(api
        .put(
            token,
            &format!("{TRANSACTIONS_PATH}/{id}"),
            &TransactionRequest::from(transaction),
        )
        .await?)
}

pub async fn delete_transaction(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{TRANSACTIONS_PATH}/{id}")).await?)
}
