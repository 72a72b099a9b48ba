//! Credit cards shown in the wallet and offered as a transaction source.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;

pub use api::{create_credit_card, delete_credit_card, get_credit_cards, update_credit_card};
pub use create::{create_credit_card_endpoint, get_new_credit_card_page};
pub use delete::delete_credit_card_endpoint;
pub use domain::{
    CreditCard, CreditCardForm, DEFAULT_CARD_COLOR, NewCreditCard, is_best_day_to_buy,
    total_limit_used, utilization_bar_style,
};
pub use edit::{get_edit_credit_card_page, update_credit_card_endpoint};
