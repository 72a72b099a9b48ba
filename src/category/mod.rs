//! Income and expense categories for transactions, budgets and recurring transactions.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;
mod select;

pub use api::{create_category, delete_category, get_categories, update_category};
pub use create::{create_category_endpoint, get_new_category_page};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryForm, CategoryName, CategoryRef, categories_of_type};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
pub use select::category_select;
