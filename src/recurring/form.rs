use maud::{Markup, html};

use crate::{
    category::{Category, category_select},
    html::{
        FormMethod, currency_input, day_of_month_input, form_error, hx_form, submit_button,
        text_input,
    },
    transaction_type::{TransactionType, transaction_type_fieldset},
};

pub(super) struct RecurringFormView<'a> {
    pub endpoint: &'a str,
    pub method: FormMethod,
    pub transaction_type: TransactionType,
    pub description: &'a str,
    pub amount: Option<f64>,
    pub due_day: Option<u8>,
    pub category_id: Option<i64>,
    pub categories: &'a [Category],
    pub error_message: &'a str,
    pub is_demo: bool,
}

pub(super) fn recurring_form_view(view: RecurringFormView<'_>) -> Markup {
    let submit_label = match view.method {
        FormMethod::Post => "Add Recurring Transaction",
        FormMethod::Put => "Save Recurring Transaction",
    };

    let fields = html! {
        (transaction_type_fieldset(view.transaction_type))
        (text_input("description", "Description", view.description, "e.g. Rent"))
        (currency_input("amount", "Amount", view.amount))
        (day_of_month_input("due_day", "Due day", view.due_day))
        (category_select(view.categories, view.category_id))
        (form_error(view.error_message))
        (submit_button(submit_label, view.is_demo))
    };

    hx_form(view.endpoint, view.method, &fields)
}

/// A mock API route listing the categories offered by the form.
#[cfg(test)]
pub(super) fn categories_route() -> axum::Router {
    use axum::{Json, routing::get};
    use serde_json::json;

    axum::Router::new().route(
        "/api/categories",
        get(|| async {
            Json(json!([
                { "id": 1, "name": "Salary", "type": "INCOME" },
                { "id": 2, "name": "Housing", "type": "EXPENSE" },
            ]))
        }),
    )
}
