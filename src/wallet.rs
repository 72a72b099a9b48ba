//! The wallet page: bank accounts, credit cards and the money available to spend.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    account::{Account, get_accounts, total_balance},
    app_state::ApiState,
    auth::Session,
    credit_card::{
        CreditCard, get_credit_cards, is_best_day_to_buy, total_limit_used, utilization_bar_style,
    },
    endpoints,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_color_style, base,
        edit_delete_action_links, format_currency, format_percentage, progress_bar,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

/// The totals shown at the top of the wallet page.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WalletSummary {
    total_balance: f64,
    total_limit_used: f64,
    /// The account balances minus what is owed on credit cards.
    purchasing_power: f64,
}

impl WalletSummary {
    fn new(accounts: &[Account], cards: &[CreditCard]) -> Self {
        let total_balance = total_balance(accounts);
        let total_limit_used = total_limit_used(cards);

        Self {
            total_balance,
            total_limit_used,
            purchasing_power: total_balance - total_limit_used,
        }
    }
}

/// Render the wallet page with the user's accounts and credit cards.
pub async fn get_wallet_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let (accounts, cards) = futures::try_join!(
        get_accounts(&state.api, &session.api_token),
        get_credit_cards(&state.api, &session.api_token),
    )
    .inspect_err(|error| tracing::error!("Could not get wallet: {error}"))?;

    Ok(wallet_view(&accounts, &cards, today, session.is_demo()).into_response())
}

fn wallet_view(accounts: &[Account], cards: &[CreditCard], today: Date, is_demo: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::WALLET_VIEW).into_html();
    let summary = WalletSummary::new(accounts, cards);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "My Wallet" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Manage your accounts and cards in one place"
                    }
                }

                (summary_view(&summary))
                (accounts_view(accounts, is_demo))
                (cards_view(cards, today, is_demo))
            }
        }
    );

    base("Wallet", &[], &content)
}

fn summary_view(summary: &WalletSummary) -> Markup {
    let items = [
        ("Total balance", "total-balance", summary.total_balance),
        ("Credit card bills", "limit-used", -summary.total_limit_used),
        ("Purchasing power", "purchasing-power", summary.purchasing_power),
    ];

    html!(
        section class={ (CARD_STYLE) " grid grid-cols-1 gap-4 md:grid-cols-3" }
        {
            @for (label, key, amount) in items {
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
    )
}

fn accounts_view(accounts: &[Account], is_demo: bool) -> Markup {
    html!(
        section class="space-y-3"
        {
            header class="flex justify-between items-end"
            {
                h2 class="text-lg font-semibold" { "Accounts" }
                a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_STYLE) { "Add Account" }
            }

            ul class="grid gap-4 md:grid-cols-2"
            {
                @for account in accounts {
                    li class=(CARD_STYLE) data-account-card="true"
                    {
                        div class="flex items-start justify-between gap-3"
                        {
                            div
                            {
                                p class="font-semibold" { (account.name) }
                                p class="text-sm text-gray-500 dark:text-gray-400"
                                {
                                    (account.bank.as_deref().unwrap_or("No bank"))
                                }
                            }

                            span
                                class={ "text-lg font-bold tabular-nums " (amount_color_style(account.current_balance)) }
                            {
                                (format_currency(account.current_balance))
                            }
                        }

                        div class="mt-3 flex items-center gap-4 text-sm"
                        {
                            (edit_delete_action_links(
                                &endpoints::format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id),
                                &endpoints::format_endpoint(endpoints::ACCOUNT, account.id),
                                &format!(
                                    "Are you sure you want to delete the account '{}'? \
                                    Accounts with transactions cannot be deleted.",
                                    account.name
                                ),
                                "closest [data-account-card='true']",
                                "delete",
                                is_demo,
                            ))
                        }
                    }
                }

                @if accounts.is_empty() {
                    li class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No accounts yet. "
                        a href=(endpoints::NEW_ACCOUNT_VIEW) class=(LINK_STYLE) { "Add your first account" }
                    }
                }
            }
        }
    )
}

fn cards_view(cards: &[CreditCard], today: Date, is_demo: bool) -> Markup {
    html!(
        section class="space-y-3"
        {
            header class="flex justify-between items-end"
            {
                h2 class="text-lg font-semibold" { "Credit cards" }
                a href=(endpoints::NEW_CREDIT_CARD_VIEW) class=(LINK_STYLE) { "Add Card" }
            }

            ul class="grid gap-4 md:grid-cols-2"
            {
                @for card in cards {
                    @let utilization = card.utilization();

                    li
                        class=(CARD_STYLE)
                        style=(format!("border-left: 4px solid {}", card.color()))
                        data-credit-card="true"
                    {
                        div class="flex items-start justify-between gap-3"
                        {
                            div
                            {
                                p class="font-semibold" { (card.name) }
                                @if let Some(digits) = &card.last_four_digits {
                                    p class="text-sm text-gray-500 dark:text-gray-400 tabular-nums"
                                    {
                                        "•••• " (digits)
                                    }
                                }
                            }

                            @if is_best_day_to_buy(card.closing_day, today) {
                                span
                                    class="rounded-full bg-green-100 px-2 py-0.5 text-xs font-semibold text-green-800 dark:bg-green-900 dark:text-green-300"
                                    data-best-day="true"
                                {
                                    "Best day to buy"
                                }
                            }
                        }

                        div class="mt-3 space-y-1"
                        {
                            div class="flex justify-between text-sm"
                            {
                                span { "Used " (format_currency(card.limit_used)) }
                                span { (format_percentage(utilization)) }
                            }

                            (progress_bar(utilization, utilization_bar_style(utilization)))

                            div class="flex justify-between text-xs text-gray-500 dark:text-gray-400"
                            {
                                span { "Available " (format_currency(card.limit_available())) }
                                span { "Limit " (format_currency(card.limit_total)) }
                            }

                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                "Closes on day " (card.closing_day) ", due on day " (card.due_day)
                            }
                        }

                        div class="mt-3 flex items-center gap-4 text-sm"
                        {
                            (edit_delete_action_links(
                                &endpoints::format_endpoint(endpoints::EDIT_CREDIT_CARD_VIEW, card.id),
                                &endpoints::format_endpoint(endpoints::CREDIT_CARD, card.id),
                                &format!("Are you sure you want to delete the card '{}'?", card.name),
                                "closest [data-credit-card='true']",
                                "delete",
                                is_demo,
                            ))
                        }
                    }
                }

                @if cards.is_empty() {
                    li class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No credit cards yet. "
                        a href=(endpoints::NEW_CREDIT_CARD_VIEW) class=(LINK_STYLE) { "Add a card" }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod wallet_page_tests {
    use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::get};
    use scraper::{Html, Selector};
    use serde_json::json;
    use time::macros::date;

    use crate::{
        account::Account,
        credit_card::CreditCard,
        test_utils::{
            api_state, assert_content_type, assert_valid_html, parse_html_document,
            spawn_mock_api, test_session,
        },
    };

    use super::{WalletSummary, get_wallet_page, wallet_view};

    fn account(id: i64, current_balance: f64) -> Account {
        Account {
            id,
            name: format!("Account {id}"),
            bank: Some("Nubank".to_owned()),
            initial_balance: 0.0,
            current_balance,
        }
    }

    fn card(id: i64, limit_used: f64, closing_day: u8) -> CreditCard {
        CreditCard {
            id,
            name: format!("Card {id}"),
            last_four_digits: Some("1234".to_owned()),
            limit_total: 1000.0,
            limit_used,
            closing_day,
            due_day: 10,
            color: None,
        }
    }

    #[track_caller]
    fn summary_text(html: &Html, key: &str) -> String {
        html.select(&Selector::parse(&format!("[data-summary='{key}']")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No summary for {key}"))
            .text()
            .collect()
    }

    #[test]
    fn purchasing_power_is_balance_minus_card_bills() {
        let summary = WalletSummary::new(
            &[account(1, 1500.0), account(2, 500.0)],
            &[card(1, 300.0, 5), card(2, 200.0, 5)],
        );

        assert_eq!(
            summary,
            WalletSummary {
                total_balance: 2000.0,
                total_limit_used: 500.0,
                purchasing_power: 1500.0,
            }
        );
    }

    #[tokio::test]
    async fn renders_accounts_cards_and_totals() {
        let api = spawn_mock_api(
            Router::new()
                .route(
                    "/api/accounts",
                    get(|| async {
                        Json(json!([
                            { "id": 1, "name": "Main", "bank": "Inter",
                              "initialBalance": 0, "currentBalance": 1200.0, "type": "CHECKING" },
                        ]))
                    }),
                )
                .route(
                    "/api/credit-cards",
                    get(|| async {
                        Json(json!([
                            { "id": 2, "name": "Gold", "lastFourDigits": "4321",
                              "limitTotal": 2000.0, "limitUsed": 200.0,
                              "closingDay": 3, "dueDay": 10, "color": "#ff0000" },
                        ]))
                    }),
                ),
        )
        .await;

        let response = get_wallet_page(State(api_state(api)), Extension(test_session()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(summary_text(&html, "total-balance"), "R$1,200.00");
        assert_eq!(summary_text(&html, "limit-used"), "-R$200.00");
        assert_eq!(summary_text(&html, "purchasing-power"), "R$1,000.00");
        let progress = html
            .select(&Selector::parse("[data-credit-card] [data-progress]").unwrap())
            .next()
            .expect("No utilization bar");
        assert_eq!(progress.value().attr("data-progress"), Some("10.0"));
    }

    #[test]
    fn marks_best_day_to_buy() {
        let cards = [card(1, 0.0, 14), card(2, 0.0, 20)];

        let html = Html::parse_document(
            &wallet_view(&[], &cards, date!(2025 - 06 - 15), false).into_string(),
        );

        let badges = html
            .select(&Selector::parse("[data-best-day]").unwrap())
            .count();
        assert_eq!(badges, 1);
    }

    #[test]
    fn full_card_uses_red_bar() {
        let cards = [card(1, 950.0, 14)];

        let html = Html::parse_document(
            &wallet_view(&[], &cards, date!(2025 - 06 - 01), false).into_string(),
        );

        let bar = html
            .select(&Selector::parse("[data-progress]").unwrap())
            .next()
            .expect("No utilization bar");
        assert!(bar.value().attr("class").unwrap().contains("bg-red-500"));
    }
}
