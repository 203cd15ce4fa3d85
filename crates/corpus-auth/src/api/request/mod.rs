use serde::Serialize;

#[derive(Serialize, Debug)]
pub(crate) struct PasswordLoginPayload<'a> {
    pub phone: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct RegisterPayload<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Payload for OTP dispatch and re-dispatch.
#[derive(Serialize, Debug)]
pub(crate) struct PhonePayload<'a> {
    pub phone: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct VerifyOtpPayload<'a> {
    pub phone: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct SignupSendOtpPayload<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub phone: &'a str,
}
