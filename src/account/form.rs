use maud::{Markup, html};

use crate::{
    account::BANKS,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMethod, currency_input, form_error, hx_form,
        submit_button, text_input,
    },
};

pub(super) struct AccountFormView<'a> {
    pub endpoint: &'a str,
    pub method: FormMethod,
    pub name: &'a str,
    pub bank: &'a str,
    pub initial_balance: Option<f64>,
    pub error_message: &'a str,
    pub is_demo: bool,
}

pub(super) fn account_form_view(view: AccountFormView<'_>) -> Markup {
    let submit_label = match view.method {
        FormMethod::Post => "Add Account",
        FormMethod::Put => "Save Account",
    };
    // Keep banks that are no longer offered selectable when editing old accounts.
    let is_listed_bank = view.bank.is_empty() || BANKS.contains(&view.bank);

    let fields = html! {
        (text_input("name", "Account name", view.name, "e.g. Main account"))

        div
        {
            label for="bank" class=(FORM_LABEL_STYLE) { "Bank" }

            select id="bank" name="bank" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[view.bank.is_empty()] { "Select a bank" }

                @if !is_listed_bank {
                    option value=(view.bank) selected { (view.bank) }
                }

                @for bank in BANKS {
                    option value=(bank) selected[bank == view.bank] { (bank) }
                }
            }
        }

        (currency_input("initial_balance", "Initial balance", view.initial_balance))
        span class="block text-xs text-gray-500 dark:text-gray-400"
        {
            "The current balance is calculated from this amount plus the account's transactions."
        }

        (form_error(view.error_message))
        (submit_button(submit_label, view.is_demo))
    };

    hx_form(view.endpoint, view.method, &fields)
}
