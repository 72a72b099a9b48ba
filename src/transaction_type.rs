//! Whether money comes in or goes out.

use std::fmt::Display;

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::html::{
    FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
};

/// The direction of a transaction, category or recurring transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The value used in forms and the API, e.g. "INCOME".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// `amount` with a positive sign for income and a negative sign for expenses.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The expense/income radio buttons shared by the transaction, category and recurring forms.
///
/// The selected value is submitted in the field "type".
pub fn transaction_type_fieldset(selected: TransactionType) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for transaction_type in [TransactionType::Expense, TransactionType::Income] {
                    @let id = format!("type-{}", transaction_type.as_str().to_lowercase());

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type"
                            id=(id)
                            type="radio"
                            value=(transaction_type.as_str())
                            checked[transaction_type == selected]
                            required
                            tabindex="0"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (transaction_type.label())
                        }
                    }
                }
            }
        }
    }
}
