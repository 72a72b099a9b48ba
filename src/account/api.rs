//! REST API calls for bank accounts.

use serde::Serialize;

use crate::{
    Error,
    account::{Account, NewAccount},
    api_client::ApiClient,
};

const ACCOUNTS_PATH: &str = "/accounts";

/// The only account type the web app creates.
const ACCOUNT_TYPE: &str = "CHECKING";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountRequest<'a> {
    name: &'a str,
    bank: &'a str,
    initial_balance: f64,
    #[serde(rename = "type")]
    account_type: &'static str,
}

impl<'a> From<&'a NewAccount> for AccountRequest<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            name: &account.name,
            bank: &account.bank,
            initial_balance: account.initial_balance,
            account_type: ACCOUNT_TYPE,
        }
    }
}

pub async fn get_accounts(api: &ApiClient, token: &str) -> Result<Vec<Account>, Error> {
    Ok(api.get(token, ACCOUNTS_PATH).await?)
}

pub async fn create_account(api: &ApiClient, token: &str, account: &NewAccount) -> Result<(), Error> {
    Ok(api
        .post(token, ACCOUNTS_PATH, &AccountRequest::from(account))
        .await?)
}

pub async fn update_account(
    api: &ApiClient,
    token: &str,
    id: i64,
    account: &NewAccount,
) -> Result<(), Error> {
    Ok(api
        .put(
            token,
            &format!("{ACCOUNTS_PATH}/{id}"),
            &AccountRequest::from(account),
        )
        .await?)
}

pub async fn delete_account(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{ACCOUNTS_PATH}/{id}")).await?)
}
