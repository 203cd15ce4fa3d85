use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{ApiError, Client};

/// The profile of the authenticated user, as returned by `GET /auth/me`.
///
/// An immutable snapshot, replaced wholesale on each successful fetch and
/// never partially updated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub phone: String,
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    /// Not provided for accounts created through the OTP signup flow.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub place: Option<String>,
    #[allow(missing_docs)]
    pub is_active: bool,
    #[allow(missing_docs)]
    pub has_given_consent: bool,
    #[serde(default)]
    #[allow(missing_docs)]
    pub consent_given_at: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub last_login_at: Option<String>,
    #[allow(missing_docs)]
    pub created_at: String,
    #[allow(missing_docs)]
    pub updated_at: String,

    #[serde(rename = "contributionsCount", skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub contributions_count: Option<u64>,
    #[serde(rename = "badgesEarned", skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub badges_earned: Option<Vec<String>>,

    /// Stores unknown api response fields
    #[serde(flatten)]
    pub(crate) extra: HashMap<String, Value>,
}

/// Resolves the current user through `GET /auth/me` and replaces the session
/// user with the result.
///
/// Any failure (transport error, non-success status, malformed body) drops
/// the whole session: the server no longer recognizes the token, so keeping
/// it or a stale user around would violate the session invariant.
pub(crate) async fn fetch_current_user(client: &Client) -> Result<User, ApiError> {
    match request_current_user(client).await {
        Ok(user) => {
            client.internal.set_user(Some(user.clone()));
            Ok(user)
        }
        Err(e) => {
            warn!("failed to fetch the current user: {e}");
            super::drop_session(client).await;
            Err(e)
        }
    }
}

async fn request_current_user(client: &Client) -> Result<User, ApiError> {
    let configuration = client.internal.get_api_configuration();

    let mut request = configuration
        .client
        .get(format!("{}/auth/me", configuration.base_path))
        .header(reqwest::header::ACCEPT, "application/json");
    if let Some(token) = &configuration.access_token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;

    if response.status().is_success() {
        Ok(response.json::<User>().await?)
    } else {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::ResponseContent { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_with_optional_and_unknown_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "5f2d",
            "phone": "9999999999",
            "name": "Asha",
            "email": "asha@example.com",
            "is_active": true,
            "has_given_consent": true,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-06-01T00:00:00Z",
            "contributionsCount": 12,
            "roles": ["contributor"]
        }))
        .expect("user should deserialize");

        assert_eq!(user.name, "Asha");
        assert_eq!(user.gender, None);
        assert_eq!(user.contributions_count, Some(12));
        assert!(user.extra.contains_key("roles"));
    }
}
