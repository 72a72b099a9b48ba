use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, transaction_type::TransactionType};

/// A category as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// A reference to a category by its ID, as the API expects in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
}

/// The name of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyField] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyField("Category name"))
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The form data for creating or editing a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// The categories in `categories` with the type `category_type`, in their original order.
pub fn categories_of_type(
    categories: &[Category],
    category_type: TransactionType,
) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.category_type == category_type)
        .collect()
}
