//! The transactions page: a month of transactions with filters, totals and bulk actions.

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
    app_state::ApiState,
    auth::{DEMO_LOCKED_LABEL, Session},
    category::{Category, categories_of_type, get_categories},
    endpoints,
    form_fields::empty_as_none,
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_color_style, base,
        edit_delete_action_links, format_currency, format_iso_date,
    },
    month::{MonthQuery, MonthYear, month_navigation},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{
        Transaction, get_transactions,
        summary::{DayGroup, TransactionSummary, day_label, group_by_day, matches_search},
    },
    transaction_type::TransactionType,
};

/// The filters of the transactions page.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub month: Option<u8>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub search: String,
}

/// The filters other than the month, kept in the month navigation links.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtraFilters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

impl TransactionsQuery {
    /// The category and search filters as "&key=value" pairs, or an empty string.
    fn extra_query_string(&self) -> String {
        let filters = ExtraFilters {
            category_id: self.category_id,
            search: Some(self.search.trim()).filter(|search| !search.is_empty()),
        };

        match serde_urlencoded::to_string(&filters) {
            Ok(query) if !query.is_empty() => format!("&{query}"),
            _ => String::new(),
        }
    }
}

/// Render the transactions of the selected month, filtered by category and search term.
pub async fn get_transactions_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(
        &MonthQuery {
            month: query.month,
            year: query.year,
        },
        today,
    );

    let (transactions, categories) = futures::try_join!(
        get_transactions(&state.api, &session.api_token, month, query.category_id),
        get_categories(&state.api, &session.api_token),
    )
    .inspect_err(|error| {
        tracing::error!("Could not get transactions for {}: {error}", month.label())
    })?;

    let transactions: Vec<Transaction> = transactions
        .into_iter()
        .filter(|transaction| matches_search(transaction, &query.search))
        .collect();

    Ok(transactions_view(TransactionsView {
        month,
        today,
        query: &query,
        categories: &categories,
        summary: TransactionSummary::from_transactions(&transactions),
        groups: group_by_day(transactions),
        is_demo: session.is_demo(),
    })
    .into_response())
}

struct TransactionsView<'a> {
    month: MonthYear,
    today: Date,
    query: &'a TransactionsQuery,
    categories: &'a [Category],
    summary: TransactionSummary,
    groups: Vec<DayGroup>,
    is_demo: bool,
}

fn transactions_view(view: TransactionsView<'_>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (month_navigation(
                    endpoints::TRANSACTIONS_VIEW,
                    view.month,
                    &view.query.extra_query_string(),
                ))
                (filter_form(view.month, view.query, view.categories))
                (summary_view(&view.summary))
                (bulk_form(&view))
            }
        }
    );

    base("Transactions", &[], &content)
}

fn filter_form(month: MonthYear, query: &TransactionsQuery, categories: &[Category]) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-col gap-3 md:flex-row md:items-end"
            data-filter-form
        {
            input type="hidden" name="month" value=(month.month_number());
            input type="hidden" name="year" value=(month.year());

            input
                type="search"
                name="search"
                value=(query.search)
                placeholder="Search description or amount"
                aria-label="Search"
                class=(FORM_TEXT_INPUT_STYLE);

            select name="categoryId" aria-label="Category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[query.category_id.is_none()] { "All categories" }

                @for category in categories {
                    option value=(category.id) selected[query.category_id == Some(category.id)]
                    {
                        (category.name)
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }
        }
    )
}

fn summary_view(summary: &TransactionSummary) -> Markup {
    let items = [
        ("Income", "income", summary.income),
        ("Expenses", "expense", -summary.expense),
        ("Balance", "balance", summary.balance),
    ];

    html!(
        section class={ (CARD_STYLE) " grid grid-cols-3 gap-4" }
        {
            @for (label, key, amount) in items {
                div
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (label) }
                    p
                        class={ "text-lg font-bold tabular-nums " (amount_color_style(amount)) }
                        data-summary=(key)
                    {
                        (format_currency(amount))
                    }
                }
            }
        }
    )
}

/// The grouped list wrapped in a form so that the checked rows can be sent to the bulk endpoints.
fn bulk_form(view: &TransactionsView<'_>) -> Markup {
    let expense_categories = categories_of_type(view.categories, TransactionType::Expense);
    let income_categories = categories_of_type(view.categories, TransactionType::Income);

    html!(
        form id="bulk-form" class="space-y-4" hx-target-error="#alert-container"
        {
            input type="hidden" name="month" value=(view.month.month_number());
            input type="hidden" name="year" value=(view.month.year());

            @if !view.groups.is_empty() {
                div class="flex flex-wrap items-center gap-3 text-sm" data-bulk-actions
                {
                    @if view.is_demo {
                        span class="text-gray-400 dark:text-gray-500" { (DEMO_LOCKED_LABEL) }
                    } @else {
                        select name="category_id" aria-label="New category" required class="p-2 rounded border border-gray-300 dark:border-gray-600 bg-gray-50 dark:bg-gray-700"
                        {
                            option value="" selected { "Choose a category" }
                            optgroup label="Expense"
                            {
                                @for category in &expense_categories {
                                    option value=(category.id) { (category.name) }
                                }
                            }
                            optgroup label="Income"
                            {
                                @for category in &income_categories {
                                    option value=(category.id) { (category.name) }
                                }
                            }
                        }

                        button
                            type="button"
                            hx-post=(endpoints::BULK_CATEGORIZE_TRANSACTIONS)
                            class=(LINK_STYLE)
                        {
                            "Set category"
                        }

                        button
                            type="button"
                            hx-post=(endpoints::BULK_DELETE_TRANSACTIONS)
                            hx-confirm="Are you sure you want to delete the selected transactions?"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete selected"
                        }
                    }
                }
            }

            @for group in &view.groups {
                (day_group_view(group, view.today, view.month, view.is_demo))
            }

            @if view.groups.is_empty() {
                p class="py-8 text-center text-gray-500 dark:text-gray-400" data-empty-state
                {
                    "No transactions found for " (view.month.label()) "."
                }
            }
        }
    )
}

fn day_group_view(group: &DayGroup, today: Date, month: MonthYear, is_demo: bool) -> Markup {
    html!(
        section class=(CARD_STYLE) data-day-group=(format_iso_date(group.date))
        {
            header class="flex justify-between mb-2"
            {
                h2 class="font-semibold" { (day_label(group.date, today)) }
                span
                    class={ "tabular-nums " (amount_color_style(group.total)) }
                    data-day-total
                {
                    (format_currency(group.total))
                }
            }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in &group.transactions {
                    (transaction_row(transaction, month, is_demo))
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, month: MonthYear, is_demo: bool) -> Markup {
    let edit_url = format!(
        "{}?{}",
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
        month.to_query_string()
    );
    let amount = transaction.signed_amount();

    html!(
        li class="flex items-center gap-3 py-2" data-transaction-row="true"
        {
            input
                type="checkbox"
                name="ids"
                value=(transaction.id)
                aria-label={ "Select " (transaction.description) }
                disabled[is_demo];

            div class="flex-1 min-w-0"
            {
                span class="block truncate" data-description { (transaction.description) }

                div class="flex flex-wrap gap-2 text-xs text-gray-500 dark:text-gray-400"
                {
                    @if let Some(category) = &transaction.category {
                        span class=(BADGE_STYLE) { (category.name) }
                    }
                    @if let Some(account_name) = &transaction.account_name {
                        span { (account_name) }
                    }
                }
            }

            span class={ "tabular-nums " (amount_color_style(amount)) } data-amount
            {
                (format_currency(amount))
            }

            div class="flex items-center gap-3 text-sm"
            {
                (edit_delete_action_links(
                    &edit_url,
                    &endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id),
                    &format!("Are you sure you want to delete '{}'?", transaction.description),
                    "closest [data-transaction-row='true']",
                    "delete",
                    is_demo,
                ))
            }
        }
    )
}

#[cfg(test)]
mod transactions_page_tests {
    use axum::{
        Extension, Json, Router,
        extract::{Query, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::{Html, Selector};
    use serde_json::{Value, json};

    use crate::{
        api_client::ApiClient,
        test_utils::{
            api_state, assert_valid_html, demo_session, parse_html_document, spawn_mock_api,
            test_session,
        },
        transaction::{TransactionsQuery, get_transactions_page},
    };

    async fn month_api() -> ApiClient {
        spawn_mock_api(
            Router::new()
                .route(
                    "/api/transactions",
                    get(|Query(query): Query<Value>| async move {
                        let mut transactions = vec![
                            json!({ "id": 1, "description": "Salary", "amount": 3000.0,
                                    "date": "2025-03-05", "type": "INCOME",
                                    "category": { "id": 1, "name": "Work", "type": "INCOME" } }),
                            json!({ "id": 2, "description": "Market", "amount": 250.0,
                                    "date": "2025-03-05", "type": "EXPENSE", "accountName": "Main",
                                    "category": { "id": 2, "name": "Food", "type": "EXPENSE" } }),
                            json!({ "id": 3, "description": "Cinema", "amount": 40.0,
                                    "date": "2025-03-09", "type": "EXPENSE", "category": null }),
                        ];
                        if query.get("categoryId") == Some(&json!("2")) {
                            transactions.retain(|transaction| transaction["id"] == 2);
                        }
                        Json(Value::Array(transactions))
                    }),
                )
                .route(
                    "/api/categories",
                    get(|| async {
                        Json(json!([
                            { "id": 1, "name": "Work", "type": "INCOME" },
                            { "id": 2, "name": "Food", "type": "EXPENSE" },
                        ]))
                    }),
                ),
        )
        .await
    }

    fn march(search: &str, category_id: Option<i64>) -> TransactionsQuery {
        TransactionsQuery {
            month: Some(3),
            year: Some(2025),
            category_id,
            search: search.to_owned(),
        }
    }

    #[track_caller]
    fn text_of(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn groups_transactions_by_day() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(test_session()),
            Query(march("", None)),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let days = html
            .select(&Selector::parse("section[data-day-group]").unwrap())
            .filter_map(|section| section.value().attr("data-day-group"))
            .collect::<Vec<_>>();
        assert_eq!(days, vec!["2025-03-09", "2025-03-05"]);
        assert_eq!(text_of(&html, "[data-day-total]"), vec!["-R$40.00", "R$2,750.00"]);
        assert_eq!(
            text_of(&html, "[data-description]"),
            vec!["Cinema", "Salary", "Market"]
        );
        assert_eq!(text_of(&html, "[data-summary=income]"), vec!["R$3,000.00"]);
        assert_eq!(text_of(&html, "[data-summary=expense]"), vec!["-R$290.00"]);
        assert_eq!(text_of(&html, "[data-summary=balance]"), vec!["R$2,710.00"]);
    }

    #[tokio::test]
    async fn search_filters_transactions() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(test_session()),
            Query(march("MARK", None)),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(text_of(&html, "[data-description]"), vec!["Market"]);
        assert_eq!(text_of(&html, "[data-summary=balance]"), vec!["-R$250.00"]);
    }

    #[tokio::test]
    async fn category_filter_is_sent_and_kept_in_navigation() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(test_session()),
            Query(march("", Some(2))),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(text_of(&html, "[data-description]"), vec!["Market"]);
        let next = html
            .select(&Selector::parse("a[rel=next]").unwrap())
            .next()
            .and_then(|link| link.value().attr("href"))
            .expect("No next month link");
        assert_eq!(next, "/transactions?month=4&year=2025&categoryId=2");
    }

    #[tokio::test]
    async fn empty_month_shows_message() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(test_session()),
            Query(march("nothing matches", None)),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(
            text_of(&html, "[data-empty-state]"),
            vec!["No transactions found for March 2025."]
        );
        assert!(text_of(&html, "[data-bulk-actions]").is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_select_transactions() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(demo_session()),
            Query(march("", None)),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let enabled_checkboxes = html
            .select(&Selector::parse("input[name=ids]:not([disabled])").unwrap())
            .count();
        assert_eq!(enabled_checkboxes, 0);
        let bulk_buttons = html
            .select(&Selector::parse("[data-bulk-actions] button").unwrap())
            .count();
        assert_eq!(bulk_buttons, 0);
    }

    #[tokio::test]
    async fn bulk_category_select_requires_a_choice() {
        let api = month_api().await;

        let response = get_transactions_page(
            State(api_state(api)),
            Extension(test_session()),
            Query(march("", None)),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let select = html
            .select(&Selector::parse("[data-bulk-actions] select[name=category_id]").unwrap())
            .next()
            .expect("No bulk category select");
        assert!(select.value().attr("required").is_some());
        let options = select
            .select(&Selector::parse("option").unwrap())
            .map(|option| {
                (
                    option.value().attr("value").unwrap_or_default().to_owned(),
                    option.text().collect::<String>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            options,
            vec![
                ("".to_owned(), "Choose a category".to_owned()),
                ("2".to_owned(), "Food".to_owned()),
                ("1".to_owned(), "Work".to_owned()),
            ]
        );
    }

    #[test]
    fn extra_query_encodes_search() {
        let query = TransactionsQuery {
            category_id: None,
            search: "café & co".to_owned(),
            ..Default::default()
        };

        assert_eq!(query.extra_query_string(), "&search=caf%C3%A9+%26+co");
    }
}
