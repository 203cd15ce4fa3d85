use corpus_core::{Client, Flow};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    api::{post_json, request::SignupSendOtpPayload},
    login::{OtpError, send_code, verify_code},
};

/// New-account fields submitted with the OTP dispatch request.
#[derive(Serialize, Deserialize, Debug)]
pub struct SignupOtpSendRequest {
    #[allow(missing_docs)]
    pub username: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub password: String,
    /// Phone number the code is dispatched to; also the account identifier.
    pub phone: String,
}

/// The two-step OTP signup flow: submit the new-account fields to request a
/// code, then trade the code for a session.
#[derive(Clone)]
pub struct OtpSignupClient {
    pub(crate) client: Client,
}

impl OtpSignupClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Submits the new-account fields and requests an OTP dispatch. No
    /// session state is touched; the account is not created until the code
    /// is verified.
    #[instrument(err, skip_all)]
    pub async fn send(&self, request: &SignupOtpSendRequest) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::SignupOtpSend)?;

        let configuration = self.client.internal.get_api_configuration();
        let payload = SignupSendOtpPayload {
            username: &request.username,
            email: &request.email,
            password: &request.password,
            phone: &request.phone,
        };
        let response = post_json(&configuration, "/auth/signup/send-otp", &payload).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.is_server_error() {
            return Err(OtpError::Server { status });
        }

        let message = response.text().await.unwrap_or_default();
        Err(OtpError::Rejected { status, message })
    }

    /// Verifies the submitted code, completing the signup. On success the
    /// session is authenticated and the token persisted.
    #[instrument(err, skip_all)]
    pub async fn verify(&self, phone: &str, otp: &str) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::SignupOtpVerify)?;
        verify_code(&self.client, "/auth/signup/verify-otp", phone, otp).await
    }

    /// Requests another code for the same pending signup.
    #[instrument(err, skip_all)]
    pub async fn resend(&self, phone: &str) -> Result<(), OtpError> {
        let _guard = self.client.internal.begin_flow(Flow::SignupOtpResend)?;
        send_code(&self.client, "/auth/signup/resend-otp", phone).await
    }
}
