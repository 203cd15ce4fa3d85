use corpus_core::{ApiError, Client, Flow, require};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    api::{post_json, request::PasswordLoginPayload, response::AccessTokenResponse},
    login::LoginError,
};

/// Credentials for a password login.
#[derive(Serialize, Deserialize, Debug)]
pub struct PasswordLoginRequest {
    /// Phone number the account is registered under.
    pub phone: String,
    #[allow(missing_docs)]
    pub password: String,
}

#[instrument(err, skip_all)]
pub(crate) async fn login_via_password(
    client: &Client,
    request: &PasswordLoginRequest,
) -> Result<(), LoginError> {
    let _guard = client.internal.begin_flow(Flow::PasswordLogin)?;

    client.internal.set_loading(true);
    let result = request_token(client, request).await;
    client.internal.set_loading(false);
    result
}

async fn request_token(client: &Client, request: &PasswordLoginRequest) -> Result<(), LoginError> {
    let configuration = client.internal.get_api_configuration();
    let payload = PasswordLoginPayload {
        phone: &request.phone,
        password: &request.password,
    };

    let response = post_json(&configuration, "/auth/login", &payload).await?;

    let status = response.status();
    if status.is_success() {
        let body: AccessTokenResponse = response.json().await.map_err(ApiError::from)?;
        let access_token = require!(body.access_token);
        corpus_core::session::establish(client, access_token).await;
        debug!("password login succeeded");
        return Ok(());
    }

    if status.is_server_error() {
        return Err(LoginError::Server { status });
    }

    debug!(%status, "password login rejected");
    Err(LoginError::RejectedCredentials)
}
