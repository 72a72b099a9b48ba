//! Categories listing page.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ApiState,
    auth::Session,
    category::{Category, categories_of_type, get_categories},
    endpoints,
    html::{BADGE_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, edit_delete_action_links},
    navigation::NavBar,
    transaction_type::TransactionType,
};

/// Render the categories page with income and expense categories listed separately.
pub async fn get_categories_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let categories = get_categories(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&categories, session.is_demo()).into_response())
}

fn categories_view(categories: &[Category], is_demo: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();
    let income = categories_of_type(categories, TransactionType::Income);
    let expense = categories_of_type(categories, TransactionType::Expense);

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                div class="grid gap-4 lg:grid-cols-2"
                {
                    (category_group_view(TransactionType::Income, &income, is_demo))
                    (category_group_view(TransactionType::Expense, &expense, is_demo))
                }
            }
        }
    );

    base("Categories", &[], &content)
}

fn category_group_view(
    category_type: TransactionType,
    categories: &[&Category],
    is_demo: bool,
) -> Markup {
    html!(
        section class=(CARD_STYLE) data-category-type=(category_type.as_str())
        {
            h2 class="mb-3 text-lg font-semibold" { (category_type.label()) }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for category in categories {
                    li class="flex items-center justify-between gap-3 py-2" data-category-row="true"
                    {
                        span class=(BADGE_STYLE) data-category-name { (category.name) }

                        div class="flex items-center gap-4 text-sm"
                        {
                            (edit_delete_action_links(
                                &endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
                                &endpoints::format_endpoint(endpoints::CATEGORY, category.id),
                                &format!("Are you sure you want to delete '{}'?", category.name),
                                "closest [data-category-row='true']",
                                "delete",
                                is_demo,
                            ))
                        }
                    }
                }

                @if categories.is_empty() {
                    li class="py-4 text-center text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No " (category_type.label().to_lowercase()) " categories yet. "
                        a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                        {
                            "Create one"
                        }
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod categories_page_tests {
    use axum::{Extension, Json, Router, extract::State, http::StatusCode, routing::get};
    use scraper::{Html, Selector};
    use serde_json::json;

    use crate::{
        category::get_categories_page,
        test_utils::{
            api_state, assert_content_type, assert_valid_html, demo_session, parse_html_document,
            spawn_mock_api, test_session,
        },
    };

    async fn categories_api() -> crate::api_client::ApiClient {
        spawn_mock_api(Router::new().route(
            "/api/categories",
            get(|| async {
                Json(json!([
                    { "id": 1, "name": "Salary", "type": "INCOME" },
                    { "id": 2, "name": "Rent", "type": "EXPENSE" },
                    { "id": 3, "name": "Food", "type": "EXPENSE" },
                ]))
            }),
        ))
        .await
    }

    #[track_caller]
    fn names_in_group(html: &Html, category_type: &str) -> Vec<String> {
        let selector = Selector::parse(&format!(
            "section[data-category-type='{category_type}'] li[data-category-row] span[data-category-name]"
        ))
        .unwrap();

        html.select(&selector)
            .map(|span| span.text().collect::<String>())
            .collect()
    }

    #[tokio::test]
    async fn lists_income_and_expense_separately() {
        let api = categories_api().await;

        let response = get_categories_page(State(api_state(api)), Extension(test_session()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(names_in_group(&html, "INCOME"), vec!["Salary"]);
        assert_eq!(names_in_group(&html, "EXPENSE"), vec!["Rent", "Food"]);
    }

    #[tokio::test]
    async fn demo_session_sees_locked_actions() {
        let api = categories_api().await;

        let response = get_categories_page(State(api_state(api)), Extension(demo_session()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let delete_buttons = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .count();
        assert_eq!(delete_buttons, 0);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Locked (demo)"));
    }
}
