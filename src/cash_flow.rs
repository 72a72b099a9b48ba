//! The cash flow page: income, expenses and the running balance for each day of a month.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    api_client::{ApiClient, iso_date, zero_if_null},
    app_state::ApiState,
    auth::Session,
    endpoints,
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        amount_color_style, base, format_currency, format_day_month,
    },
    month::{MonthQuery, MonthYear, month_navigation},
    navigation::NavBar,
    timezone::current_local_date,
};

const CASH_FLOW_PATH: &str = "/reports/cash-flow";

/// The money that came in and went out on one day.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowDay {
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_expense: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub net_balance: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CashFlowParams {
    #[serde(with = "iso_date")]
    start_date: Date,
    #[serde(with = "iso_date")]
    end_date: Date,
}

/// Get the daily cash flow for every day of `month`.
pub async fn get_cash_flow(
    api: &ApiClient,
    token: &str,
    month: MonthYear,
) -> Result<Vec<CashFlowDay>, Error> {
    let params = CashFlowParams {
        start_date: month.first_day(),
        end_date: month.last_day(),
    };

    Ok(api.get_with_query(token, CASH_FLOW_PATH, &params).await?)
}

/// The balance after each day, accumulated from the start of the period in the order given.
pub fn running_balances(days: &[CashFlowDay]) -> Vec<f64> {
    days.iter()
        .scan(0.0, |balance, day| {
            *balance += day.total_income - day.total_expense;
            Some(*balance)
        })
        .collect()
}

/// The totals for a period of cash flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlowTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl CashFlowTotals {
    pub fn from_days(days: &[CashFlowDay]) -> Self {
        let income = days.iter().map(|day| day.total_income).sum::<f64>();
        let expense = days.iter().map(|day| day.total_expense).sum::<f64>();

        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// Render the cash flow of the selected month.
pub async fn get_cash_flow_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(&query, today);

    let days = get_cash_flow(&state.api, &session.api_token, month)
        .await
        .inspect_err(|error| {
            tracing::error!("Could not get cash flow for {}: {error}", month.label())
        })?;

    Ok(cash_flow_view(&days, month).into_response())
}

fn cash_flow_view(days: &[CashFlowDay], month: MonthYear) -> Markup {
    let nav_bar = NavBar::new(endpoints::CASH_FLOW_VIEW).into_html();
    let totals = CashFlowTotals::from_days(days);
    let balances = running_balances(days);
    let summary = [
        ("Income", "income", totals.income),
        ("Expenses", "expense", -totals.expense),
        ("Balance", "balance", totals.balance),
    ];

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Cash Flow" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Daily income and expenses with the balance over the month"
                    }
                }

                (month_navigation(endpoints::CASH_FLOW_VIEW, month, ""))

                section class={ (CARD_STYLE) " grid grid-cols-1 gap-4 md:grid-cols-3" }
                {
                    @for (label, key, amount) in summary {
                        div
                        {
                            p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                            p
                                class={ "text-2xl font-bold tabular-nums " (amount_color_style(amount)) }
                                data-summary=(key)
                            {
                                (format_currency(amount))
                            }
                        }
                    }
                }

                @if days.is_empty() {
                    p class="py-8 text-center text-sm text-gray-500 dark:text-gray-400" data-empty-state
                    {
                        "No cash flow for " (month.label()) "."
                    }
                } @else {
                    div class="relative overflow-x-auto rounded-lg shadow-md"
                    {
                        table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Day" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Net" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                                }
                            }

                            tbody
                            {
                                @for (day, balance) in days.iter().zip(balances) {
                                    tr class=(TABLE_ROW_STYLE) data-cash-flow-day=(day.date.to_string())
                                    {
                                        td class=(TABLE_CELL_STYLE) { (format_day_month(day.date)) }
                                        td class={ (TABLE_CELL_STYLE) " tabular-nums text-green-600 dark:text-green-400" }
                                        {
                                            (format_currency(day.total_income))
                                        }
                                        td class={ (TABLE_CELL_STYLE) " tabular-nums text-red-600 dark:text-red-400" }
                                        {
                                            (format_currency(day.total_expense))
                                        }
                                        td class={ (TABLE_CELL_STYLE) " tabular-nums " (amount_color_style(day.net_balance)) }
                                        {
                                            (format_currency(day.net_balance))
                                        }
                                        td
                                            class={ (TABLE_CELL_STYLE) " tabular-nums font-semibold " (amount_color_style(balance)) }
                                            data-running-balance
                                        {
                                            (format_currency(balance))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Cash Flow", &[], &content)
}
