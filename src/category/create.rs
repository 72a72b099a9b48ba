//! Category creation page and endpoint.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::Markup;

use crate::{
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    category::{
        CategoryForm, CategoryName, create_category,
        form::{CategoryFormView, category_form_view},
    },
    endpoints,
    html::{FormMethod, form_page},
    transaction_type::TransactionType,
};

/// Render the category creation page.
pub async fn get_new_category_page(Extension(session): Extension<Session>) -> Response {
    new_category_view(session.is_demo()).into_response()
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<CategoryForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return new_category_form_view(
                &form.name,
                form.category_type,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    match create_category(&state.api, &session.api_token, &name, form.category_type).await {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            error.into_alert_response()
        }
    }
}

fn new_category_view(is_demo: bool) -> Markup {
    let form = category_form_view(CategoryFormView {
        endpoint: endpoints::CATEGORIES_API,
        method: FormMethod::Post,
        name: "",
        category_type: TransactionType::Expense,
        error_message: "",
        is_demo,
    });

    form_page("Create Category", endpoints::CATEGORIES_VIEW, &form)
}

fn new_category_form_view(
    name: &str,
    category_type: TransactionType,
    error_message: &str,
) -> Markup {
    category_form_view(CategoryFormView {
        endpoint: endpoints::CATEGORIES_API,
        method: FormMethod::Post,
        name,
        category_type,
        error_message,
        is_demo: false,
    })
}

#[cfg(test)]
mod new_category_page_tests {
    use axum::{Extension, http::StatusCode};

    use crate::{
        category::get_new_category_page,
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_valid_html,
            demo_session, must_get_form, parse_html_document, test_session,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_new_category_page(Extension(test_session())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CATEGORIES_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "type", "radio");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn submit_is_locked_in_demo_mode() {
        let response = get_new_category_page(Extension(demo_session())).await;

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_form_submit_button_with_text(&form, "Locked (demo)");
    }
}
