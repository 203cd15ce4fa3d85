//! Login flows.
//!
//! Password login trades credentials for a token in one round trip; OTP login
//! is the two-step send/verify flow, with resend available in between.

mod otp;
mod password;

use corpus_core::{ApiError, MissingFieldError, OperationInProgressError};
pub use otp::{OtpError, OtpLoginClient};
pub(crate) use otp::{send_code, verify_code};
pub use password::PasswordLoginRequest;
pub(crate) use password::login_via_password;
use thiserror::Error;

/// Errors from the password login flow.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The server rejected the credentials.
    #[error("The credentials were rejected")]
    RejectedCredentials,

    /// The server failed to process the request.
    #[error("Server error: {status}")]
    Server {
        #[allow(missing_docs)]
        status: reqwest::StatusCode,
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
