//! The page and endpoint for setting a category's budget for a month.
//!
//! The API keeps one budget per category and month, so setting a budget
//! again replaces the old limit and the same form serves for editing.

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    budget::{BudgetForm, NewBudget, get_budgets, save_budget},
    category::{Category, categories_of_type, get_categories},
    endpoints,
    form_fields::empty_as_none,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, FormMethod, currency_input, form_error,
        form_page, hx_form, submit_button,
    },
    month::{MonthQuery, MonthYear},
    timezone::current_local_date,
    transaction_type::TransactionType,
};

/// The month and, when editing, the category of the budget to set.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPageQuery {
    pub month: Option<u8>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
}

struct BudgetFormView<'a> {
    month: MonthYear,
    categories: &'a [Category],
    category_id: Option<i64>,
    amount: Option<f64>,
    error_message: &'a str,
    is_demo: bool,
}

fn budget_form_view(view: BudgetFormView<'_>) -> Markup {
    let expense_categories = categories_of_type(view.categories, TransactionType::Expense);

    let fields = html! {
        input type="hidden" name="month" value=(view.month.month_number());
        input type="hidden" name="year" value=(view.month.year());

        span class="block text-sm text-gray-500 dark:text-gray-400" data-budget-month
        {
            "Budget for " (view.month.label())
        }

        div
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category_id" name="category_id" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[view.category_id.is_none()] { "Select a category" }

                @for category in expense_categories {
                    option value=(category.id) selected[view.category_id == Some(category.id)]
                    {
                        (category.name)
                    }
                }
            }
        }

        (currency_input("amount", "Monthly limit", view.amount))
        (form_error(view.error_message))
        (submit_button("Save Budget", view.is_demo))
    };

    hx_form(endpoints::BUDGETS_API, FormMethod::Post, &fields)
}

/// Render the form for setting a budget, filled in with the existing limit when there is one.
pub async fn get_set_budget_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Query(query): Query<BudgetPageQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(
        &MonthQuery {
            month: query.month,
            year: query.year,
        },
        today,
    );

    let (categories, budgets) = futures::try_join!(
        get_categories(&state.api, &session.api_token),
        get_budgets(&state.api, &session.api_token, month),
    )
    .inspect_err(|error| tracing::error!("Could not get budget form data: {error}"))?;

    let amount = query.category_id.and_then(|category_id| {
        budgets
            .iter()
            .find(|budget| budget.category_id == category_id)
            .map(|budget| budget.limit_amount)
    });

    let form = budget_form_view(BudgetFormView {
        month,
        categories: &categories,
        category_id: query.category_id,
        amount,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Set Budget", endpoints::BUDGETS_VIEW, &form).into_response())
}

/// Handle the budget form submission.
pub async fn set_budget_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<BudgetForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let month = MonthYear::from_query(
        &MonthQuery {
            month: Some(form.month),
            year: Some(form.year),
        },
        today,
    );

    let categories = match get_categories(&state.api, &session.api_token).await {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Could not get categories: {error}");
            return error.into_alert_response();
        }
    };

    let budget = match NewBudget::from_form(&form, month, &categories) {
        Ok(budget) => budget,
        Err(error) => {
            return budget_form_view(BudgetFormView {
                month,
                categories: &categories,
                category_id: form.category_id,
                amount: Some(form.amount),
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match save_budget(&state.api, &session.api_token, &budget).await {
        Ok(()) => (
            HxRedirect(format!(
                "{}?{}",
                endpoints::BUDGETS_VIEW,
                month.to_query_string()
            )),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while saving a budget: {error}");
            error.into_alert_response()
        }
    }
}
