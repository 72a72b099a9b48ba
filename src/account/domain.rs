use serde::{Deserialize, Serialize};

use crate::{Error, api_client::zero_if_null};

/// The banks offered in the account form. The last two are for cash and anything else.
pub const BANKS: [&str; 10] = [
    "Nubank",
    "Itaú",
    "Bradesco",
    "Santander",
    "Inter",
    "C6 Bank",
    "Caixa",
    "Banco do Brasil",
    "Cash",
    "Other",
];

/// A bank account as returned by the API.
///
/// The current balance is computed by the API from the initial balance and
/// the account's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bank: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub initial_balance: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_balance: f64,
}

/// The sum of the current balances of `accounts`.
pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts.iter().map(|account| account.current_balance).sum()
}

/// The form data for creating or editing an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountForm {
    pub name: String,
    pub bank: String,
    pub initial_balance: f64,
}

/// A validated account ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub bank: String,
    pub initial_balance: f64,
}

impl NewAccount {
    /// Validate the submitted account form.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] if the name or bank is blank.
    pub fn from_form(form: &AccountForm) -> Result<Self, Error> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyField("Account name"));
        }

        let bank = form.bank.trim();
        if bank.is_empty() {
            return Err(Error::EmptyField("Bank"));
        }

        Ok(Self {
            name: name.to_owned(),
            bank: bank.to_owned(),
            initial_balance: form.initial_balance,
        })
    }
}
