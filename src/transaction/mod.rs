//! Income and expenses: the monthly transactions page, its forms and bulk actions.

mod api;
mod bulk;
mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod page;
mod summary;

pub use api::{create_transaction, delete_transaction, get_transactions, update_transaction};
pub use bulk::{
    BulkCategorizeForm, BulkDeleteForm, bulk_categorize_transactions_endpoint,
    bulk_delete_transactions_endpoint,
};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, TransactionForm, TransactionSource};
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use page::{TransactionsQuery, get_transactions_page};
