use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    account::{Account, get_accounts},
    api_client::ApiClient,
    category::{Category, category_select, get_categories},
    credit_card::{CreditCard, get_credit_cards},
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMethod, currency_input, date_input,
        form_error, hx_form, submit_button, text_input,
    },
    transaction_type::{TransactionType, transaction_type_fieldset},
};

/// The accounts, credit cards and categories offered by the transaction form.
pub(super) struct FormOptions {
    pub accounts: Vec<Account>,
    pub credit_cards: Vec<CreditCard>,
    pub categories: Vec<Category>,
}

impl FormOptions {
    pub async fn fetch(api: &ApiClient, token: &str) -> Result<Self, Error> {
        let (accounts, credit_cards, categories) = futures::try_join!(
            get_accounts(api, token),
            get_credit_cards(api, token),
            get_categories(api, token),
        )?;

        Ok(Self {
            accounts,
            credit_cards,
            categories,
        })
    }
}

pub(super) struct TransactionFormView<'a> {
    pub endpoint: &'a str,
    pub method: FormMethod,
    pub transaction_type: TransactionType,
    pub description: &'a str,
    pub amount: Option<f64>,
    pub date: Date,
    /// The selected "account-<id>" or "card-<id>" value, empty for none.
    pub source: &'a str,
    pub category_id: Option<i64>,
    pub options: &'a FormOptions,
    pub error_message: &'a str,
    pub is_demo: bool,
}

pub(super) fn transaction_form_view(view: TransactionFormView<'_>) -> Markup {
    let is_edit = view.method == FormMethod::Put;
    let submit_label = if is_edit {
        "Save Transaction"
    } else {
        "Add Transaction"
    };

    let fields = html! {
        (transaction_type_fieldset(view.transaction_type))
        (text_input("description", "Description", view.description, "e.g. Groceries"))
        (currency_input("amount", "Amount", view.amount))
        (date_input("date", "Date", view.date))
        (source_select(view.options, view.source, is_edit))
        (category_select(&view.options.categories, view.category_id))
        (form_error(view.error_message))
        (submit_button(submit_label, view.is_demo))
    };

    hx_form(view.endpoint, view.method, &fields)
}

fn source_select(options: &FormOptions, selected: &str, is_edit: bool) -> Markup {
    html! {
        div
        {
            label for="source" class=(FORM_LABEL_STYLE) { "Account or credit card" }

            select id="source" name="source" required[!is_edit] class=(FORM_TEXT_INPUT_STYLE)
            {
                @if is_edit {
                    option value="" selected[selected.is_empty()] { "Keep current" }
                } @else {
                    option value="" disabled selected[selected.is_empty()] { "Select an account or card" }
                }

                optgroup label="Accounts"
                {
                    @for account in &options.accounts {
                        @let value = format!("account-{}", account.id);
                        option value=(value) selected[value == selected] { (account.name) }
                    }
                }

                optgroup label="Credit cards"
                {
                    @for card in &options.credit_cards {
                        @let value = format!("card-{}", card.id);
                        option value=(value) selected[value == selected] { (card.name) }
                    }
                }
            }

            span class="block mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "Credit cards only accept expenses."
            }
        }
    }
}

/// Mock API routes for the accounts, credit cards and categories the form offers.
#[cfg(test)]
pub(super) fn form_options_routes() -> axum::Router {
    use axum::{Json, routing::get};
    use serde_json::json;

    axum::Router::new()
        .route(
            "/api/accounts",
            get(|| async {
                Json(json!([
                    { "id": 1, "name": "Main", "bank": "Nubank",
                      "initialBalance": 0.0, "currentBalance": 1200.0 },
                ]))
            }),
        )
        .route(
            "/api/credit-cards",
            get(|| async {
                Json(json!([
                    { "id": 2, "name": "Gold", "lastFourDigits": "1234", "limitTotal": 5000.0,
                      "limitUsed": 300.0, "closingDay": 5, "dueDay": 12, "color": "#3b82f6" },
                ]))
            }),
        )
        .route(
            "/api/categories",
            get(|| async {
                Json(json!([
                    { "id": 3, "name": "Salary", "type": "INCOME" },
                    { "id": 4, "name": "Food", "type": "EXPENSE" },
                ]))
            }),
        )
}
