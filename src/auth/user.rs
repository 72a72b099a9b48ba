//! The logged in user's profile as returned by the API.

use serde::{Deserialize, Serialize};

use crate::{Error, api_client::ApiClient};

/// The subscription plan of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanType {
    Free,
    Pro,
    Lifetime,
}

impl PlanType {
    pub fn label(self) -> &'static str {
        match self {
            PlanType::Free => "Free",
            PlanType::Pro => "Pro",
            PlanType::Lifetime => "Lifetime",
        }
    }
}

/// The profile of the logged in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    /// A data URL of the profile picture, e.g. "data:image/png;base64,...".
    pub profile_image: Option<String>,
    pub plan_type: Option<PlanType>,
}

/// The fields of the profile the user may change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub profile_image: Option<&'a str>,
}

const USERS_ME: &str = "/users/me";

pub async fn get_current_user(api: &ApiClient, token: &str) -> Result<UserProfile, Error> {
    Ok(api.get(token, USERS_ME).await?)
}

pub async fn update_current_user(
    api: &ApiClient,
    token: &str,
    update: &ProfileUpdate<'_>,
) -> Result<UserProfile, Error> {
    Ok(api.put_returning(token, USERS_ME, update).await?)
}

#[cfg(test)]
mod user_tests {
    use super::{PlanType, UserProfile};

    #[test]
    fn deserialises_profile() {
        let json = r#"{"email":"ana@example.com","name":"Ana","profileImage":null,"planType":"PRO"}"#;

        let got: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(
            got,
            UserProfile {
                email: "ana@example.com".to_owned(),
                name: Some("Ana".to_owned()),
                profile_image: None,
                plan_type: Some(PlanType::Pro),
            }
        );
    }

    #[test]
    fn missing_optional_fields_deserialise() {
        let got: UserProfile = serde_json::from_str(r#"{"email":"ana@example.com"}"#).unwrap();

        assert_eq!(got.name, None);
        assert_eq!(got.plan_type, None);
    }
}
