use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful response from a token-granting endpoint
/// (`/auth/login`, `/auth/login/verify-otp`, `/auth/signup/verify-otp`).
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct AccessTokenResponse {
    pub access_token: Option<String>,

    /// Stores unknown api response fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
