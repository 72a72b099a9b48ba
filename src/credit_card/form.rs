use maud::{Markup, html};

use crate::{
    credit_card::DEFAULT_CARD_COLOR,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMethod, currency_input, day_of_month_input,
        form_error, hx_form, submit_button, text_input,
    },
};

/// The values to fill the credit card form with.
#[derive(Default)]
pub(super) struct CreditCardFormValues<'a> {
    pub name: &'a str,
    pub last_four_digits: &'a str,
    pub limit_total: Option<f64>,
    pub closing_day: Option<u8>,
    pub due_day: Option<u8>,
    pub color: &'a str,
}

pub(super) fn credit_card_form_view(
    endpoint: &str,
    method: FormMethod,
    values: &CreditCardFormValues<'_>,
    error_message: &str,
    is_demo: bool,
) -> Markup {
    let submit_label = match method {
        FormMethod::Post => "Add Card",
        FormMethod::Put => "Save Card",
    };
    let color = if values.color.is_empty() {
        DEFAULT_CARD_COLOR
    } else {
        values.color
    };

    let fields = html! {
        (text_input("name", "Card name", values.name, "e.g. Nubank Gold"))

        div
        {
            label for="last_four_digits" class=(FORM_LABEL_STYLE) { "Last four digits" }

            input
                id="last_four_digits"
                type="text"
                name="last_four_digits"
                value=(values.last_four_digits)
                inputmode="numeric"
                pattern="[0-9]{4}"
                maxlength="4"
                placeholder="1234"
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        (currency_input("limit_total", "Total limit", values.limit_total))

        div class="grid grid-cols-2 gap-4"
        {
            (day_of_month_input("closing_day", "Closing day", values.closing_day))
            (day_of_month_input("due_day", "Due day", values.due_day))
        }

        div
        {
            label for="color" class=(FORM_LABEL_STYLE) { "Colour" }

            input
                id="color"
                type="color"
                name="color"
                value=(color)
                class="h-10 w-full cursor-pointer rounded border border-gray-300 dark:border-gray-600";
        }

        (form_error(error_message))
        (submit_button(submit_label, is_demo))
    };

    hx_form(endpoint, method, &fields)
}
