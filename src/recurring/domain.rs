use serde::Deserialize;

use crate::{
    Error,
    api_client::zero_if_null,
    category::Category,
    form_fields::empty_as_none,
    transaction_type::TransactionType,
};

/// The only frequency the web app creates recurring transactions with.
pub const MONTHLY: &str = "MONTHLY";

/// A bill or income that repeats every month, e.g. rent or a salary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: i64,
    pub description: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category: Option<Category>,
    pub due_day: u8,
    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurringForm {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: f64,
    pub due_day: u8,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
}

/// A validated recurring transaction ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecurring {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    pub due_day: u8,
}

impl NewRecurring {
    /// Validate a recurring transaction form against the user's `categories`.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is blank, the amount is not
    /// positive, the due day is outside 1-31, or the category has a different
    /// type.
    pub fn from_form(form: &RecurringForm, categories: &[Category]) -> Result<Self, Error> {
        let description = form.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyField("Description"));
        }

        if !form.amount.is_finite() || form.amount <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        if !(1..=31).contains(&form.due_day) {
            return Err(Error::InvalidDayOfMonth(form.due_day));
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
            transaction_type: form.transaction_type,
            category_id: form.category_id,
            due_day: form.due_day,
        })
    }
}
