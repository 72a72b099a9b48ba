//! The budgets page: each expense category's limit against what was spent in a month.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ApiState,
    auth::Session,
    budget::{Budget, BudgetStatus, get_budgets},
    endpoints,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, edit_delete_action_links,
        format_currency, format_percentage, progress_bar,
    },
    month::{MonthQuery, MonthYear, month_navigation},
    navigation::NavBar,
    timezone::current_local_date,
};

/// Render the budgets of the selected month.
pub async fn get_budgets_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(&query, today);

    let budgets = get_budgets(&state.api, &session.api_token, month)
        .await
        .inspect_err(|error| tracing::error!("Could not get budgets: {error}"))?;

    Ok(budgets_view(&budgets, month, session.is_demo()).into_response())
}

fn budgets_view(budgets: &[Budget], month: MonthYear, is_demo: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();
    let new_budget_url = format!("{}?{}", endpoints::NEW_BUDGET_VIEW, month.to_query_string());

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { "Budgets" }
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Set spending limits for your expense categories"
                        }
                    }

                    a href=(new_budget_url) class=(LINK_STYLE) { "Set Budget" }
                }

                (month_navigation(endpoints::BUDGETS_VIEW, month, ""))

                ul class="grid gap-4 md:grid-cols-2 lg:grid-cols-3"
                {
                    @for budget in budgets {
                        (budget_card(budget, month, is_demo))
                    }

                    @if budgets.is_empty() {
                        li class="py-8 text-center text-sm text-gray-500 dark:text-gray-400 md:col-span-2 lg:col-span-3"
                        {
                            "No budgets for " (month.label()) ". "
                            a href=(new_budget_url) class=(LINK_STYLE) { "Set your first budget" }
                        }
                    }
                }
            }
        }
    );

    base("Budgets", &[], &content)
}

fn budget_card(budget: &Budget, month: MonthYear, is_demo: bool) -> Markup {
    let status = BudgetStatus::from_percentage(budget.percentage);
    let edit_url = format!(
        "{}?{}&categoryId={}",
        endpoints::NEW_BUDGET_VIEW,
        month.to_query_string(),
        budget.category_id
    );

    html!(
        li class={ (CARD_STYLE) " space-y-3" } data-budget-card="true"
        {
            div class="flex items-start justify-between gap-3"
            {
                h2 class="font-semibold" { (budget.category_name) }
                span
                    class={ "text-xs font-bold px-2 py-1 rounded-full bg-gray-100 dark:bg-gray-700 " (status.text_style()) }
                    data-percentage
                {
                    (format_percentage(budget.percentage))
                }
            }

            div class="flex justify-between text-sm text-gray-500 dark:text-gray-400"
            {
                span { "Spent: " span class="font-medium" data-spent { (format_currency(budget.spent_amount)) } }
                span { "Limit: " span class="font-medium" { (format_currency(budget.limit_amount)) } }
            }

            (progress_bar(budget.bar_width(), status.bar_style()))

            @if budget.is_over_budget() {
                p class="text-xs font-medium text-red-600 dark:text-red-400" data-over-budget
                {
                    "Over budget by " (format_currency(-budget.remaining()))
                }
            } @else {
                p class="text-xs text-gray-500 dark:text-gray-400" data-remaining
                {
                    (format_currency(budget.remaining())) " left"
                }
            }

            div class="flex items-center gap-4 text-sm"
            {
                (edit_delete_action_links(
                    &edit_url,
                    &endpoints::format_endpoint(endpoints::BUDGET, budget.id),
                    &format!("Are you sure you want to delete the budget for '{}'?", budget.category_name),
                    "closest [data-budget-card='true']",
                    "delete",
                    is_demo,
                ))
            }
        }
    )
}
