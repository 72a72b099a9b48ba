use crate::{api_client::ApiClient, app_state::ApiState};

/// The state for handlers that talk to `api`, using UTC as the local timezone.
pub(crate) fn api_state(api: ApiClient) -> ApiState {
    ApiState {
        api,
        local_timezone: "Etc/UTC".to_owned(),
    }
}
