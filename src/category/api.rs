//! REST API calls for categories.

use serde::Serialize;

use crate::{
    Error,
    api_client::ApiClient,
    category::{Category, CategoryName},
    transaction_type::TransactionType,
};

const CATEGORIES_PATH: &str = "/categories";

#[derive(Serialize)]
struct CategoryRequest<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    category_type: TransactionType,
}

/// Get all of the user's categories.
pub async fn get_categories(api: &ApiClient, token: &str) -> Result<Vec<Category>, Error> {
    Ok(api.get(token, CATEGORIES_PATH).await?)
}

/// Create a new category.
pub async fn create_category(
    api: &ApiClient,
    token: &str,
    name: &CategoryName,
    category_type: TransactionType,
) -> Result<(), Error> {
    let request = CategoryRequest {
        name: name.as_ref(),
        category_type,
    };

    Ok(api.post(token, CATEGORIES_PATH, &request).await?)
}

/// Replace the name and type of the category with `id`.
pub async fn update_category(
    api: &ApiClient,
    token: &str,
    id: i64,
    name: &CategoryName,
    category_type: TransactionType,
) -> Result<(), Error> {
    let request = CategoryRequest {
        name: name.as_ref(),
        category_type,
    };

    Ok(api
        .put(token, &format!("{CATEGORIES_PATH}/{id}"), &request)
        .await?)
}

pub async fn delete_category(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{CATEGORIES_PATH}/{id}")).await?)
}
