//! Signup flows.
//!
//! Direct registration creates an account in one round trip without
//! authenticating. The OTP signup flow submits the new-account fields with
//! the dispatch request and authenticates on verification.

mod otp;
mod registration;

pub use otp::{OtpSignupClient, SignupOtpSendRequest};
pub use registration::{RegisterError, RegisterRequest};
pub(crate) use registration::register;
