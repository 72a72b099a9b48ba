//! The reports page: a month of expenses broken down by category.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    api_client::{ApiClient, zero_if_null},
    app_state::ApiState,
    auth::Session,
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, format_percentage, progress_bar},
    month::{MonthQuery, MonthYear, month_navigation},
    navigation::NavBar,
    timezone::current_local_date,
};

const EXPENSES_BY_CATEGORY_PATH: &str = "/reports/expenses-by-category";

/// How much was spent on one category and its share of the month's expenses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category_name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub percentage: f64,
}

#[derive(Serialize)]
struct MonthParams {
    month: u8,
    year: i32,
}

pub async fn get_expenses_by_category(
    api: &ApiClient,
    token: &str,
    month: MonthYear,
) -> Result<Vec<CategoryExpense>, Error> {
    let params = MonthParams {
        month: month.month_number(),
        year: month.year(),
    };

    Ok(api
        .get_with_query(token, EXPENSES_BY_CATEGORY_PATH, &params)
        .await?)
}

/// Render the expense report of the selected month.
pub async fn get_reports_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(&query, today);

    let expenses = get_expenses_by_category(&state.api, &session.api_token, month)
        .await
        .inspect_err(|error| tracing::error!("Could not get expenses by category: {error}"))?;

    Ok(reports_view(&expenses, month).into_response())
}

fn reports_view(expenses: &[CategoryExpense], month: MonthYear) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();
    let total = expenses.iter().map(|expense| expense.total_value).sum::<f64>();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-3xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Reports" }
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Where your money went" }
                }

                (month_navigation(endpoints::REPORTS_VIEW, month, ""))

                section class={ (CARD_STYLE) " space-y-4" }
                {
                    div class="flex justify-between items-baseline"
                    {
                        h2 class="font-semibold" { "Expenses by category" }
                        p class="text-lg font-bold tabular-nums" data-total-expenses { (format_currency(total)) }
                    }

                    @if expenses.is_empty() {
                        p class="py-8 text-center text-sm text-gray-500 dark:text-gray-400" data-empty-state
                        {
                            "No expenses in " (month.label()) "."
                        }
                    }

                    ul class="space-y-3"
                    {
                        @for expense in expenses {
                            li class="space-y-1" data-category-expense=(expense.category_name)
                            {
                                div class="flex justify-between gap-3 text-sm"
                                {
                                    span class="font-medium" { (expense.category_name) }
                                    span class="tabular-nums"
                                    {
                                        (format_currency(expense.total_value))
                                        " "
                                        span class="text-gray-500 dark:text-gray-400" data-percentage
                                        {
                                            (format_percentage(expense.percentage))
                                        }
                                    }
                                }
                                (progress_bar(expense.percentage, "bg-blue-500"))
                            }
                        }
                    }
                }
            }
        }
    );

    base("Reports", &[], &content)
}
