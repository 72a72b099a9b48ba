//! Bills and income that repeat every month and can be launched as transactions.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod launch;
mod page;

pub use api::{
    create_recurring, delete_recurring, get_recurring_transactions, launch_recurring,
    update_recurring,
};
pub use create::{create_recurring_endpoint, get_new_recurring_page};
pub use delete::delete_recurring_endpoint;
pub use domain::{MONTHLY, NewRecurring, RecurringForm, RecurringTransaction};
pub use edit::{get_edit_recurring_page, update_recurring_endpoint};
pub use launch::launch_recurring_endpoint;
pub use page::get_recurring_page;
