use corpus_core::{ApiError, Client, Flow, OperationInProgressError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{post_json, request::RegisterPayload};

/// New-account fields for direct registration.
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    #[allow(missing_docs)]
    pub username: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub password: String,
}

/// Errors from the registration flow.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The server rejected the registration.
    #[error("The registration was rejected: [{status}] {message}")]
    Rejected {
        #[allow(missing_docs)]
        status: StatusCode,
        #[allow(missing_docs)]
        message: String,
    },

    /// The server failed to process the request.
    #[error("Server error: {status}")]
    Server {
        #[allow(missing_docs)]
        status: StatusCode,
    },

    #[error(transparent)]
    #[allow(missing_docs)]
    OperationInProgress(#[from] OperationInProgressError),

    #[error(transparent)]
    #[allow(missing_docs)]
    Api(#[from] ApiError),
}

#[instrument(err, skip_all)]
pub(crate) async fn register(
    client: &Client,
    request: &RegisterRequest,
) -> Result<(), RegisterError> {
    let _guard = client.internal.begin_flow(Flow::Register)?;

    client.internal.set_loading(true);
    let result = request_registration(client, request).await;
    client.internal.set_loading(false);
    result
}

// Registration does not authenticate the caller; no session state is touched.
async fn request_registration(
    client: &Client,
    request: &RegisterRequest,
) -> Result<(), RegisterError> {
    let configuration = client.internal.get_api_configuration();
    let payload = RegisterPayload {
        username: &request.username,
        email: &request.email,
        password: &request.password,
    };

    let response = post_json(&configuration, "/auth/register", &payload).await?;

    let status = response.status();
    if status.is_success() {
        debug!("registration accepted");
        return Ok(());
    }
    if status.is_server_error() {
        return Err(RegisterError::Server { status });
    }

    let message = response.text().await.unwrap_or_default();
    Err(RegisterError::Rejected { status, message })
}
