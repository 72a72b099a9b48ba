use maud::{Markup, html};

use crate::{
    html::{FormMethod, form_error, hx_form, submit_button, text_input},
    transaction_type::{TransactionType, transaction_type_fieldset},
};

/// The fields shared by the create and edit category forms.
pub(super) struct CategoryFormView<'a> {
    pub endpoint: &'a str,
    pub method: FormMethod,
    pub name: &'a str,
    pub category_type: TransactionType,
    pub error_message: &'a str,
    pub is_demo: bool,
}

pub(super) fn category_form_view(view: CategoryFormView<'_>) -> Markup {
    let submit_label = match view.method {
        FormMethod::Post => "Create Category",
        FormMethod::Put => "Save Category",
    };

    let fields = html! {
        (text_input("name", "Name", view.name, "Category name"))
        (transaction_type_fieldset(view.category_type))
        (form_error(view.error_message))
        (submit_button(submit_label, view.is_demo))
    };

    hx_form(view.endpoint, view.method, &fields)
}
