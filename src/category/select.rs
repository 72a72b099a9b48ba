//! The category drop-down shared by the transaction and recurring transaction forms.

use maud::{Markup, html};

use crate::{
    category::{Category, categories_of_type},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction_type::TransactionType,
};

/// A select named "category_id" with the categories grouped by type and a blank "No category" option.
pub fn category_select(categories: &[Category], selected: Option<i64>) -> Markup {
    html! {
        div
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category_id" name="category_id" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[selected.is_none()] { "No category" }

                @for category_type in [TransactionType::Expense, TransactionType::Income] {
                    optgroup label=(category_type.label()) data-category-type=(category_type.as_str())
                    {
                        @for category in categories_of_type(categories, category_type) {
                            option value=(category.id) selected[selected == Some(category.id)]
                            {
                                (category.name)
                            }
                        }
                    }
                }
            }

            span class="block mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "The category must match the transaction type."
            }
        }
    }
}
