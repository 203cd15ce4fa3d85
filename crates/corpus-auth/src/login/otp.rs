use corpus_core::{ApiError, Client, Flow, MissingFieldError, OperationInProgressError, require};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{
    post_json,
    request::{PhonePayload, VerifyOtpPayload},
    response::AccessTokenResponse,
};

/// Errors from the OTP flows. Shared between login and signup, which differ
/// only in their endpoints.
#[derive(Debug, Error)]
pub enum OtpError {
    /// The submitted code was rejected.
    #[error("The one-time password was rejected")]
    InvalidOtp,

    /// The server refused to dispatch a code.
    #[error("The server refused to send a one-time password: [{status}] {message}")]
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
    MissingField(#[from] MissingFieldError),

    #[error(transparent)]
    #[allow(missing_docs)]
    Api(#[from] ApiError),
}

/// The two-step OTP login flow: request a code for a phone number, then trade
/// the code for a session.
#[derive(Clone)]
pub struct OtpLoginClient {
    pub(crate) client: Client,
}

impl OtpLoginClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Requests an OTP dispatch to the given phone number. No session state
    /// is touched.
    #[instrument(err, skip_all)]
    pub async fn send(&self, phone: &str) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::LoginOtpSend)?;
        send_code(&self.client, "/auth/login/send-otp", phone).await
    }

    /// Verifies the submitted code, completing the OTP login. On success the
    /// session is authenticated and the token persisted.
    #[instrument(err, skip_all)]
    pub async fn verify(&self, phone: &str, otp: &str) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::LoginOtpVerify)?;
        verify_code(&self.client, "/auth/login/verify-otp", phone, otp).await
    }

    /// Requests another code for the same phone number. Idempotent with
    /// respect to session state.
    #[instrument(err, skip_all)]
    pub async fn resend(&self, phone: &str) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::LoginOtpResend)?;
        send_code(&self.client, "/auth/login/resend-otp", phone).await
    }
}

pub(crate) async fn send_code(client: &Client, path: &str, phone: &str) -> Result<(), OtpError> {
    let configuration = client.internal.get_api_configuration();
    let response = post_json(&configuration, path, &PhonePayload { phone }).await?;

    let status = response.status();
    if status.is_success() {
        debug!(path, "otp dispatch accepted");
        return Ok(());
    }
    if status.is_server_error() {
        return Err(OtpError::Server { status });
    }

    let message = response.text().await.unwrap_or_default();
    Err(OtpError::Rejected { status, message })
}

pub(crate) async fn verify_code(
    client: &Client,
    path: &str,
    phone: &str,
    otp: &str,
) -> Result<(), OtpError> {
    let configuration = client.internal.get_api_configuration();
    let response = post_json(&configuration, path, &VerifyOtpPayload { phone, otp }).await?;

    let status = response.status();
    if status.is_success() {
        let body: AccessTokenResponse = response.json().await.map_err(ApiError::from)?;
        let access_token = require!(body.access_token);
        corpus_core::session::establish(client, access_token).await;
        debug!(path, "otp verification succeeded");
        return Ok(());
    }
    if status.is_server_error() {
        return Err(OtpError::Server { status });
    }

    debug!(%status, path, "otp verification rejected");
    Err(OtpError::InvalidOtp)
}
