//! Category editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    category::{
        CategoryForm, CategoryName, get_categories,
        form::{CategoryFormView, category_form_view},
        update_category,
    },
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for editing the category with `category_id`.
///
/// The API has no endpoint for a single category, so the category is looked
/// up in the list of all categories.
pub async fn get_edit_category_page(
    Path(category_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let category = get_categories(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get categories: {error}"))?
        .into_iter()
        .find(|category| category.id == category_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category_id);
    let form = category_form_view(CategoryFormView {
        endpoint: &endpoint,
        method: FormMethod::Put,
        name: &category.name,
        category_type: category.category_type,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Edit Category", endpoints::CATEGORIES_VIEW, &form).into_response())
}

/// Handle category edit form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<i64>,
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
            let endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category_id);

            return category_form_view(CategoryFormView {
                endpoint: &endpoint,
                method: FormMethod::Put,
                name: &form.name,
                category_type: form.category_type,
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match update_category(
        &state.api,
        &session.api_token,
        category_id,
        &name,
        form.category_type,
    )
    .await
    {
        Ok(()) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
