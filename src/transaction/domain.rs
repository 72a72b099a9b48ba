use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    api_client::{iso_date, zero_if_null},
    category::Category,
    form_fields::empty_as_none,
    transaction_type::TransactionType,
};

/// A transaction as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    /// The size of the transaction. Always positive, the direction is given by `transaction_type`.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The name of the account or credit card the transaction belongs to.
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Transaction {
    /// The amount with a positive sign for income and a negative sign for expenses.
    pub fn signed_amount(&self) -> f64 {
        self.transaction_type.signed(self.amount)
    }
}

/// Where the money of a transaction comes from or goes to.
///
/// In forms this is encoded as "account-<id>" or "card-<id>".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSource {
    Account(i64),
    CreditCard(i64),
}

impl FromStr for TransactionSource {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTransactionSource(text.to_owned());
        let (kind, id) = text.split_once('-').ok_or_else(invalid)?;
        let id = id.parse().map_err(|_| invalid())?;

        match kind {
            "account" => Ok(TransactionSource::Account(id)),
            "card" => Ok(TransactionSource::CreditCard(id)),
            _ => Err(invalid()),
        }
    }
}

impl Display for TransactionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionSource::Account(id) => write!(f, "account-{id}"),
            TransactionSource::CreditCard(id) => write!(f, "card-{id}"),
        }
    }
}

/// The form data for creating or editing a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub date: Date,
    /// "account-<id>", "card-<id>" or empty to keep the current source when editing.
    #[serde(default)]
    pub source: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
}

/// A validated transaction ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub date: Date,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    /// `None` leaves the source of an existing transaction unchanged.
    pub source: Option<TransactionSource>,
}

impl NewTransaction {
    /// Validate a submitted transaction form against the user's `categories`.
    ///
    /// New transactions must have a source, edited transactions keep their
    /// current source when none is chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the description is blank,
    /// - the amount is not greater than zero,
    /// - the source is missing when `require_source` is set, or cannot be parsed,
    /// - an income is charged to a credit card,
    /// - or the category does not exist or has a different type.
    pub fn from_form(
        form: &TransactionForm,
        categories: &[Category],
        require_source: bool,
    ) -> Result<Self, Error> {
        let description = form.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyField("Description"));
        }

        if !form.amount.is_finite() || form.amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        let source = match form.source.trim() {
            "" if require_source => return Err(Error::MissingTransactionSource),
            "" => None,
            source => Some(source.parse::<TransactionSource>()?),
        };

        if matches!(source, Some(TransactionSource::CreditCard(_)))
            && form.transaction_type == TransactionType::Income
        {
            return Err(Error::CreditCardIncome);
        }

        if let Some(category_id) = form.category_id {
            let category_matches = categories.iter().any(|category| {
                category.id == category_id && category.category_type == form.transaction_type
            });

            if !category_matches {
                return Err(Error::CategoryTypeMismatch);
            }
        }

        Ok(Self {
            description: description.to_owned(),
            amount: form.amount,
            date: form.date,
            transaction_type: form.transaction_type,
            category_id: form.category_id,
            source,
        })
    }
}

#[cfg(test)]
mod transaction_source_tests {
    use crate::{Error, transaction::TransactionSource};

    #[test]
    fn parses_accounts_and_cards() {
        assert_eq!(
            "account-12".parse::<TransactionSource>(),
            Ok(TransactionSource::Account(12))
        );
        assert_eq!(
            "card-3".parse::<TransactionSource>(),
            Ok(TransactionSource::CreditCard(3))
        );
    }

    #[test]
    fn rejects_unknown_sources() {
        for text in ["wallet-1", "account-", "account", "card-x"] {
            assert_eq!(
                text.parse::<TransactionSource>(),
                Err(Error::InvalidTransactionSource(text.to_owned())),
            );
        }
    }

    #[test]
    fn displays_form_value() {
        assert_eq!(TransactionSource::CreditCard(7).to_string(), "card-7");
    }
}
