use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    account::get_accounts,
    app_state::ApiState,
    auth::Session,
    dashboard::domain::{
        CATEGORY_COLORS, DailyExpense, DashboardData, FlowBars, NetWorthData, TopCategory,
        UpcomingExpense, relative_to_largest,
    },
    endpoints,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_color_style, base, format_currency,
        format_day_month, format_signed_percentage, progress_bar,
    },
    navigation::NavBar,
    transaction::Transaction,
};

const DASHBOARD_PATH: &str = "/dashboard";

/// Display a page with an overview of the user's month.
pub async fn get_dashboard_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let (data, accounts) = futures::try_join!(
        async {
            state
                .api
                .get::<DashboardData>(&session.api_token, DASHBOARD_PATH)
                .await
                .map_err(Error::from)
        },
        get_accounts(&state.api, &session.api_token),
    )
    .inspect_err(|error| tracing::error!("Could not get dashboard data: {error}"))?;

    let net_worth = NetWorthData::or_account_total(data.net_worth_data, &accounts);

    Ok(dashboard_view(&data, &net_worth).into_response())
}

fn dashboard_view(data: &DashboardData, net_worth: &NetWorthData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Dashboard" }

                div class="grid gap-4 md:grid-cols-3"
                {
                    div class="md:col-span-2" { (daily_expenses_view(&data.daily_expenses, data.monthly_expense)) }
                    (net_worth_view(net_worth))
                }

                div class="grid gap-4 md:grid-cols-2"
                {
                    (month_flow_view(data))
                    (top_categories_view(&data.top_categories))
                }

                div class="grid gap-4 md:grid-cols-2"
                {
                    (recent_transactions_view(&data.recent_transactions))
                    (upcoming_expenses_view(&data.upcoming_expenses))
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn daily_expenses_view(days: &[DailyExpense], month_total: f64) -> Markup {
    let heights = relative_to_largest(days.iter().map(|day| day.total));

    html!(
        section class=(CARD_STYLE)
        {
            h2 class="text-sm font-medium text-gray-500 dark:text-gray-400" { "Spending this month" }
            p class="text-2xl font-bold tabular-nums" { (format_currency(month_total)) }

            @if days.is_empty() {
                p class="py-8 text-center text-sm text-gray-500 dark:text-gray-400"
                {
                    "No spending to show for this period."
                }
            } @else {
                div class="mt-4 flex h-48 items-end gap-1" data-daily-expenses
                {
                    @for (day, height) in days.iter().zip(heights) {
                        div
                            class="flex h-full flex-1 flex-col justify-end"
                            title=(format!("{}: {}", day.date, format_currency(day.total)))
                        {
                            div
                                class="w-full rounded-t bg-red-500"
                                style=(format!("height: {height:.1}%"))
                                data-day=(day.date)
                                data-height=(format!("{height:.1}"))
                            {}
                        }
                    }
                }
            }
        }
    )
}

fn net_worth_view(net_worth: &NetWorthData) -> Markup {
    html!(
        section class={ (CARD_STYLE) " space-y-3" }
        {
            h2 class="text-sm font-medium text-gray-500 dark:text-gray-400" { "Net worth" }
            p class="text-3xl font-bold tabular-nums" data-net-worth { (format_currency(net_worth.net_worth)) }
            p class={ "text-sm font-medium " (amount_color_style(net_worth.percentage_change)) }
            {
                span data-net-worth-change { (format_signed_percentage(net_worth.percentage_change)) }
                " vs last month"
            }

            dl class="space-y-1 text-sm"
            {
                div class="flex justify-between"
                {
                    dt { "Accounts" }
                    dd class="tabular-nums" data-accounts-total { (format_currency(net_worth.total_balance)) }
                }

                @if net_worth.total_assets > 0.0 {
                    div class="flex justify-between"
                    {
                        dt { "Assets" }
                        dd class="tabular-nums" data-assets-total { (format_currency(net_worth.total_assets)) }
                    }
                }
            }
        }
    )
}

fn month_flow_view(data: &DashboardData) -> Markup {
    let bars = FlowBars::new(data.monthly_income, data.monthly_expense);

    html!(
        section class={ (CARD_STYLE) " space-y-4" } data-month-flow
        {
            h2 class="font-semibold" { "Income vs expenses" }

            div class="space-y-1"
            {
                div class="flex justify-between text-sm"
                {
                    span { "Income" }
                    span class="tabular-nums" { (format_currency(data.monthly_income)) }
                }
                (progress_bar(bars.income_percent, "bg-green-500"))
            }

            div class="space-y-1"
            {
                div class="flex justify-between text-sm"
                {
                    span { "Expenses" }
                    span class="tabular-nums" { (format_currency(data.monthly_expense)) }
                }
                (progress_bar(bars.expense_percent, "bg-red-500"))
            }

            p class="flex justify-between border-t pt-3 font-semibold dark:border-gray-700"
            {
                span { "Result" }
                span class={ "tabular-nums " (amount_color_style(data.monthly_result)) } data-month-result
                {
                    (format_currency(data.monthly_result))
                }
            }
        }
    )
}

fn top_categories_view(categories: &[TopCategory]) -> Markup {
    let widths = relative_to_largest(categories.iter().map(|category| category.total_amount));

    html!(
        section class={ (CARD_STYLE) " space-y-4" }
        {
            h2 class="font-semibold" { "Top categories" }

            @if categories.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No expenses this month." }
            }

            ul class="space-y-3"
            {
                @for (index, (category, width)) in categories.iter().zip(widths).enumerate() {
                    li class="space-y-1" data-top-category=(category.category_name)
                    {
                        div class="flex justify-between text-sm"
                        {
                            span { (category.category_name) }
                            span class="tabular-nums" { (format_currency(category.total_amount)) }
                        }
                        (progress_bar(width, CATEGORY_COLORS[index % CATEGORY_COLORS.len()]))
                    }
                }
            }
        }
    )
}

fn recent_transactions_view(transactions: &[Transaction]) -> Markup {
    html!(
        section class={ (CARD_STYLE) " space-y-3" }
        {
            header class="flex justify-between items-end"
            {
                h2 class="font-semibold" { "Recent transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "See all" }
            }

            @if transactions.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No transactions yet." }
            }

            ul class="divide-y divide-gray-100 dark:divide-gray-700"
            {
                @for transaction in transactions {
                    li class="flex justify-between gap-3 py-2" data-recent-transaction
                    {
                        div
                        {
                            p class="font-medium" { (transaction.description) }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (format_day_month(transaction.date))
                                @if let Some(category) = &transaction.category {
                                    " · " (category.name)
                                }
                            }
                        }

                        span class={ "tabular-nums " (amount_color_style(transaction.signed_amount())) }
                        {
                            (format_currency(transaction.signed_amount()))
                        }
                    }
                }
            }
        }
    )
}

fn upcoming_expenses_view(expenses: &[UpcomingExpense]) -> Markup {
    html!(
        section class={ (CARD_STYLE) " space-y-3" }
        {
            header class="flex justify-between items-end"
            {
                h2 class="font-semibold" { "Upcoming bills" }
                a href=(endpoints::RECURRING_VIEW) class=(LINK_STYLE) { "Manage" }
            }

            @if expenses.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No bills due for the rest of the month." }
            }

            ul class="divide-y divide-gray-100 dark:divide-gray-700"
            {
                @for expense in expenses {
                    li class="flex justify-between gap-3 py-2" data-upcoming-expense
                    {
                        div
                        {
                            p class="font-medium" { (expense.description) }
                            @if let Some(due_day) = expense.due_day {
                                p class="text-xs text-gray-500 dark:text-gray-400" { "Due on day " (due_day) }
                            }
                        }

                        span class="tabular-nums text-red-600 dark:text-red-400"
                        {
                            (format_currency(expense.amount))
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod dashboard_page_tests {
    use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::get};
    use scraper::{Html, Selector};
    use serde_json::{Value, json};

    use crate::{
        api_client::ApiClient,
        dashboard::get_dashboard_page,
        test_utils::{api_state, assert_valid_html, parse_html_document, spawn_mock_api, test_session},
    };

    async fn mock_api(dashboard: Value) -> ApiClient {
        spawn_mock_api(
            Router::new()
                .route("/api/dashboard", get(move || async move { Json(dashboard) }))
                .route(
                    "/api/accounts",
                    get(|| async {
                        Json(json!([
                            { "id": 1, "name": "Main", "currentBalance": 1200.0 },
                            { "id": 2, "name": "Savings", "currentBalance": 300.0 },
                        ]))
                    }),
                ),
        )
        .await
    }

    #[track_caller]
    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element matching {selector}"))
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    fn progress_values(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .filter_map(|element| element.value().attr("data-progress").map(str::to_owned))
            .collect()
    }

    #[tokio::test]
    async fn renders_month_overview() {
        let api = mock_api(json!({
            "monthlyIncome": 4000.0,
            "monthlyExpense": 1000.0,
            "monthlyResult": 3000.0,
            "topCategories": [
                { "categoryName": "Housing", "totalAmount": 600.0 },
                { "categoryName": "Food", "totalAmount": 300.0 },
            ],
            "dailyExpenses": [
                { "date": "01/03", "total": 50.0 },
                { "date": "02/03", "total": 200.0 },
            ],
            "netWorthData": {
                "totalBalance": 1500.0,
                "totalAssets": 45000.0,
                "netWorth": 46500.0,
                "percentageChange": 3.25,
            },
            "recentTransactions": [{
                "id": 1,
                "description": "Groceries",
                "amount": 85.5,
                "date": "2025-03-02",
                "type": "EXPENSE",
                "category": { "id": 4, "name": "Food", "type": "EXPENSE" },
            }],
            "upcomingExpenses": [
                { "id": 9, "description": "Rent", "amount": 1500.0, "dueDay": 10 },
            ],
        }))
        .await;

        let response = get_dashboard_page(State(api_state(api)), Extension(test_session()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            progress_values(&html, "[data-month-flow] [data-progress]"),
            vec!["100.0", "25.0"]
        );
        assert_eq!(
            progress_values(&html, "[data-top-category] [data-progress]"),
            vec!["100.0", "50.0"]
        );
        let heights = html
            .select(&Selector::parse("[data-daily-expenses] [data-height]").unwrap())
            .filter_map(|bar| bar.value().attr("data-height"))
            .collect::<Vec<_>>();
        assert_eq!(heights, vec!["25.0", "100.0"]);
        assert_eq!(text_of(&html, "[data-net-worth]"), "R$46,500.00");
        assert_eq!(text_of(&html, "[data-net-worth-change]"), "+3.3%");
        assert_eq!(text_of(&html, "[data-assets-total]"), "R$45,000.00");
        assert_eq!(text_of(&html, "[data-month-result]"), "R$3,000.00");
        assert!(text_of(&html, "[data-recent-transaction]").contains("-R$85.50"));
        assert!(text_of(&html, "[data-upcoming-expense]").contains("Due on day 10"));
    }

    #[tokio::test]
    async fn falls_back_to_account_balances_without_net_worth() {
        let api = mock_api(json!({ "monthlyIncome": null })).await;

        let response = get_dashboard_page(State(api_state(api)), Extension(test_session()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(text_of(&html, "[data-net-worth]"), "R$1,500.00");
        assert_eq!(text_of(&html, "[data-accounts-total]"), "R$1,500.00");
        assert!(
            html.select(&Selector::parse("[data-assets-total]").unwrap())
                .next()
                .is_none()
        );
        assert_eq!(
            progress_values(&html, "[data-month-flow] [data-progress]"),
            vec!["0.0", "0.0"]
        );
    }
}
