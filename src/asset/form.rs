use maud::{Markup, html};

use crate::{
    asset::AssetType,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMethod, currency_input, form_error, hx_form,
        submit_button, text_input,
    },
};

pub(super) struct AssetFormView<'a> {
    pub endpoint: &'a str,
    pub method: FormMethod,
    pub name: &'a str,
    pub value: Option<f64>,
    pub asset_type: AssetType,
    pub error_message: &'a str,
    pub is_demo: bool,
}

pub(super) fn asset_form_view(view: AssetFormView<'_>) -> Markup {
    let submit_label = match view.method {
        FormMethod::Post => "Add Asset",
        FormMethod::Put => "Save Asset",
    };

    let fields = html! {
        (text_input("name", "Name", view.name, "e.g. Car"))
        (currency_input("value", "Current value", view.value))

        div
        {
            label for="type" class=(FORM_LABEL_STYLE) { "Type" }

            select id="type" name="type" required class=(FORM_TEXT_INPUT_STYLE)
            {
                @for asset_type in AssetType::ALL {
                    option value=(asset_type.as_str()) selected[asset_type == view.asset_type]
                    {
                        (asset_type.label())
                    }
                }
            }
        }

        (form_error(view.error_message))
        (submit_button(submit_label, view.is_demo))
    };

    hx_form(view.endpoint, view.method, &fields)
}
