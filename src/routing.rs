//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::Redirect,
    routing::{delete, get, patch, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{
        create_account_endpoint, delete_account_endpoint, get_edit_account_page,
        get_new_account_page, update_account_endpoint,
    },
    asset::{
        create_asset_endpoint, delete_asset_endpoint, get_assets_page, get_edit_asset_page,
        get_new_asset_page, update_asset_endpoint,
    },
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page,
        post_demo_log_in, post_log_in, register_user,
    },
    budget::{delete_budget_endpoint, get_budgets_page, get_set_budget_page, set_budget_endpoint},
    cash_flow::get_cash_flow_page,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    credit_card::{
        create_credit_card_endpoint, delete_credit_card_endpoint, get_edit_credit_card_page,
        get_new_credit_card_page, update_credit_card_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    notification::{get_notifications_fragment, mark_notification_read_endpoint},
    recurring::{
        create_recurring_endpoint, delete_recurring_endpoint, get_edit_recurring_page,
        get_new_recurring_page, get_recurring_page, launch_recurring_endpoint,
        update_recurring_endpoint,
    },
    report::get_reports_page,
    settings::{get_settings_page, update_profile_endpoint},
    transaction::{
        bulk_categorize_transactions_endpoint, bulk_delete_transactions_endpoint,
        create_transaction_endpoint, delete_transaction_endpoint, get_edit_transaction_page,
        get_new_transaction_page, get_transactions_page, update_transaction_endpoint,
    },
    wallet::get_wallet_page,
};

/// The largest profile picture upload accepted, in bytes.
const PROFILE_UPLOAD_LIMIT: usize = 5 * 1024 * 1024;

/// Return a router with all the app's routes.
///
/// Files in `static_dir` are served under [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::DEMO_LOG_IN_API, post(post_demo_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::USERS, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::WALLET_VIEW, get(get_wallet_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_new_account_page))
        .route(endpoints::EDIT_ACCOUNT_VIEW, get(get_edit_account_page))
        .route(
            endpoints::NEW_CREDIT_CARD_VIEW,
            get(get_new_credit_card_page),
        )
        .route(
            endpoints::EDIT_CREDIT_CARD_VIEW,
            get(get_edit_credit_card_page),
        )
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::BUDGETS_VIEW, get(get_budgets_page))
        .route(endpoints::NEW_BUDGET_VIEW, get(get_set_budget_page))
        .route(endpoints::RECURRING_VIEW, get(get_recurring_page))
        .route(endpoints::NEW_RECURRING_VIEW, get(get_new_recurring_page))
        .route(
            endpoints::EDIT_RECURRING_VIEW,
            get(get_edit_recurring_page),
        )
        .route(endpoints::ASSETS_VIEW, get(get_assets_page))
        .route(endpoints::NEW_ASSET_VIEW, get(get_new_asset_page))
        .route(endpoints::EDIT_ASSET_VIEW, get(get_edit_asset_page))
        .route(endpoints::CASH_FLOW_VIEW, get(get_cash_flow_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::PROFILE,
                put(update_profile_endpoint).layer(DefaultBodyLimit::max(PROFILE_UPLOAD_LIMIT)),
            )
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION,
                put(update_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .route(
                endpoints::BULK_DELETE_TRANSACTIONS,
                post(bulk_delete_transactions_endpoint),
            )
            .route(
                endpoints::BULK_CATEGORIZE_TRANSACTIONS,
                post(bulk_categorize_transactions_endpoint),
            )
            .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
            .route(
                endpoints::ACCOUNT,
                put(update_account_endpoint).delete(delete_account_endpoint),
            )
            .route(
                endpoints::CREDIT_CARDS_API,
                post(create_credit_card_endpoint),
            )
            .route(
                endpoints::CREDIT_CARD,
                put(update_credit_card_endpoint).delete(delete_credit_card_endpoint),
            )
            .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
            .route(
                endpoints::CATEGORY,
                put(update_category_endpoint).delete(delete_category_endpoint),
            )
            .route(endpoints::BUDGETS_API, post(set_budget_endpoint))
            .route(endpoints::BUDGET, delete(delete_budget_endpoint))
            .route(endpoints::RECURRING_API, post(create_recurring_endpoint))
            .route(
                endpoints::RECURRING,
                put(update_recurring_endpoint).delete(delete_recurring_endpoint),
            )
            .route(
                endpoints::LAUNCH_RECURRING,
                post(launch_recurring_endpoint),
            )
            .route(endpoints::NOTIFICATIONS, get(get_notifications_fragment))
            .route(
                endpoints::NOTIFICATION_READ,
                patch(mark_notification_read_endpoint),
            )
            .route(endpoints::ASSETS_API, post(create_asset_endpoint))
            .route(
                endpoints::ASSET,
                put(update_asset_endpoint).delete(delete_asset_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
