use corpus_core::Client;

use crate::{
    login::{LoginError, OtpLoginClient, PasswordLoginRequest},
    signup::{OtpSignupClient, RegisterError, RegisterRequest},
};

/// Subclient containing auth functionality.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) client: Client,
}

impl AuthClient {
    /// Constructs a new `AuthClient` with the given `Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Logs in with phone number and password. On success the session is
    /// authenticated and the token persisted.
    pub async fn login_password(&self, request: &PasswordLoginRequest) -> Result<(), LoginError> {
        crate::login::login_via_password(&self.client, request).await
    }

    /// Registers a new account. Does not authenticate the caller.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), RegisterError> {
        crate::signup::register(&self.client, request).await
    }

    /// Client for the OTP login flow
    pub fn login_otp(&self) -> OtpLoginClient {
        OtpLoginClient::new(self.client.clone())
    }

    /// Client for the OTP signup flow
    pub fn signup_otp(&self) -> OtpSignupClient {
        OtpSignupClient::new(self.client.clone())
    }
}

/// Extension trait for `Client` to provide access to the `AuthClient`.
pub trait AuthClientExt {
    /// Creates a new `AuthClient` instance.
    fn auth(&self) -> AuthClient;
}

impl AuthClientExt for Client {
    fn auth(&self) -> AuthClient {
        AuthClient {
            client: self.clone(),
        }
    }
}
