use clap::Args;
use color_eyre::eyre::Result;
use corpus_auth::{AuthClientExt, login::OtpError, signup::SignupOtpSendRequest};
use corpus_core::Client;
use inquire::{Password, Text};
use tracing::info;

use crate::{
    auth::form::{AuthForm, AuthTab, Field, WizardStep},
    prompts::text_prompt_when_none,
};

#[derive(Args, Clone)]
pub(crate) struct RegisterArgs {
    #[arg(long, help = "Username for the new account.")]
    pub username: Option<String>,

    #[arg(long, help = "Email address for the new account.")]
    pub email: Option<String>,

    #[arg(short = 'p', long, help = "Phone number the OTP is dispatched to.")]
    pub phone: Option<String>,
}

pub(crate) async fn register(client: Client, args: RegisterArgs) -> Result<()> {
    let mut form = AuthForm::new();
    form.switch_tab(AuthTab::Register);

    form.set_field(
        Field::Username,
        text_prompt_when_none("Username", args.username)?,
    );
    form.set_field(Field::Email, text_prompt_when_none("Email", args.email)?);
    form.set_field(Field::Password, Password::new("Password").prompt()?);
    form.set_field(Field::Phone, text_prompt_when_none("Phone", args.phone)?);

    let otp = client.auth().signup_otp();

    // Step 1: submit the account fields and request a code.
    if form.begin_submit() {
        let sent = otp
            .send(&SignupOtpSendRequest {
                username: form.username().to_owned(),
                email: form.email().to_owned(),
                password: form.password().to_owned(),
                phone: form.phone().to_owned(),
            })
            .await;
        form.on_send_result(sent.is_ok());
        sent?;
    }
    info!("OTP sent to {}", form.phone());

    // Step 2: collect and verify.
    while form.step() == WizardStep::EnterOtp {
        let code = Text::new("OTP (or 'resend')").prompt()?;
        if code.trim() == "resend" && form.can_resend() {
            otp.resend(form.phone()).await?;
            info!("OTP re-sent to {}", form.phone());
            continue;
        }
        form.set_field(Field::Otp, code);

        if !form.begin_submit() {
            continue;
        }
        match otp.verify(form.phone(), form.otp()).await {
            Ok(()) => form.on_verify_result(true),
            Err(OtpError::InvalidOtp) => {
                form.on_verify_result(false);
                info!("The code was rejected, try again");
            }
            Err(e) => {
                form.on_verify_result(false);
                return Err(e.into());
            }
        }
    }

    super::login::report_session(&client, &form);
    Ok(())
}
