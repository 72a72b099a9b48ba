//! Bank accounts shown in the wallet.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;

pub use api::{create_account, delete_account, get_accounts, update_account};
pub use create::{create_account_endpoint, get_new_account_page};
pub use delete::delete_account_endpoint;
pub use domain::{Account, AccountForm, BANKS, NewAccount, total_balance};
pub use edit::{get_edit_account_page, update_account_endpoint};
