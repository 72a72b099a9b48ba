//! The URIs of the web app's pages and HTMX endpoints.
//!
//! For endpoints that take a parameter, e.g., '/accounts/{account_id}/edit', use [format_endpoint].

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a month of transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page listing bank accounts and credit cards.
pub const WALLET_VIEW: &str = "/wallet";
/// The page for creating a new bank account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page for editing a bank account.
pub const EDIT_ACCOUNT_VIEW: &str = "/accounts/{account_id}/edit";
/// The page for creating a new credit card.
pub const NEW_CREDIT_CARD_VIEW: &str = "/credit-cards/new";
/// The page for editing a credit card.
pub const EDIT_CREDIT_CARD_VIEW: &str = "/credit-cards/{card_id}/edit";
/// The page listing income and expense categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for editing a category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The page showing a month of budgets against actual spending.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page for setting a category's budget.
pub const NEW_BUDGET_VIEW: &str = "/budgets/new";
/// The page listing recurring bills and income.
pub const RECURRING_VIEW: &str = "/recurring";
/// The page for creating a recurring transaction.
pub const NEW_RECURRING_VIEW: &str = "/recurring/new";
/// The page for editing a recurring transaction.
pub const EDIT_RECURRING_VIEW: &str = "/recurring/{recurring_id}/edit";
/// The page listing assets.
pub const ASSETS_VIEW: &str = "/assets";
/// The page for creating an asset.
pub const NEW_ASSET_VIEW: &str = "/assets/new";
/// The page for editing an asset.
pub const EDIT_ASSET_VIEW: &str = "/assets/{asset_id}/edit";
/// The page showing daily income, expenses and the running balance for a month.
pub const CASH_FLOW_VIEW: &str = "/cash-flow";
/// The page showing a month of expenses by category.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for editing the user's profile.
pub const SETTINGS_VIEW: &str = "/settings";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for logging in to the demo account.
pub const DEMO_LOG_IN_API: &str = "/api/log_in/demo";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to register a new user.
pub const USERS: &str = "/api/users";
/// The route to update the logged in user's profile.
pub const PROFILE: &str = "/api/profile";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to delete the selected transactions.
pub const BULK_DELETE_TRANSACTIONS: &str = "/api/transactions/bulk/delete";
/// The route to change the category of the selected transactions.
pub const BULK_CATEGORIZE_TRANSACTIONS: &str = "/api/transactions/bulk/category";
/// The route to create bank accounts.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to update or delete a bank account.
pub const ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route to create credit cards.
pub const CREDIT_CARDS_API: &str = "/api/credit-cards";
/// The route to update or delete a credit card.
pub const CREDIT_CARD: &str = "/api/credit-cards/{card_id}";
/// The route to create categories.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update or delete a category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route to create or update budgets.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to delete a budget.
pub const BUDGET: &str = "/api/budgets/{budget_id}";
/// The route to create recurring transactions.
pub const RECURRING_API: &str = "/api/recurring";
/// The route to update or delete a recurring transaction.
pub const RECURRING: &str = "/api/recurring/{recurring_id}";
/// The route to create this month's transaction from a recurring transaction.
pub const LAUNCH_RECURRING: &str = "/api/recurring/{recurring_id}/launch";
/// The route to create assets.
pub const ASSETS_API: &str = "/api/assets";
/// The route to update or delete an asset.
pub const ASSET: &str = "/api/assets/{asset_id}";
/// The HTMX fragment with the notification bell and the unread notifications.
pub const NOTIFICATIONS: &str = "/api/notifications";
/// The route to mark a notification as read.
pub const NOTIFICATION_READ: &str = "/api/notifications/{notification_id}/read";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
