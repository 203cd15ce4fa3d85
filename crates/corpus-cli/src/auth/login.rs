use clap::Args;
use color_eyre::eyre::Result;
use corpus_auth::{
    AuthClientExt,
    login::{OtpError, PasswordLoginRequest},
};
use corpus_core::Client;
use inquire::{Password, Text};
use tracing::info;

use crate::{
    auth::form::{AuthForm, AuthTab, Field, WizardStep},
    prompts::text_prompt_when_none,
};

#[derive(Args, Clone)]
pub(crate) struct LoginArgs {
    #[arg(short = 'p', long, help = "Phone number the account is registered under.")]
    pub phone: Option<String>,

    #[arg(long, help = "Use the OTP flow instead of a password.")]
    pub otp: bool,
}

pub(crate) async fn login(client: Client, args: LoginArgs) -> Result<()> {
    if args.otp {
        login_otp(client, args.phone).await
    } else {
        login_password(client, args.phone).await
    }
}

async fn login_password(client: Client, phone: Option<String>) -> Result<()> {
    let mut form = AuthForm::new();
    form.set_field(Field::Phone, text_prompt_when_none("Phone", phone)?);
    form.set_field(
        Field::Password,
        Password::new("Password").without_confirmation().prompt()?,
    );

    client
        .auth()
        .login_password(&PasswordLoginRequest {
            phone: form.phone().to_owned(),
            password: form.password().to_owned(),
        })
        .await?;

    report_session(&client, &form);
    Ok(())
}

async fn login_otp(client: Client, phone: Option<String>) -> Result<()> {
    let mut form = AuthForm::new();
    form.set_field(Field::Phone, text_prompt_when_none("Phone", phone)?);

    let otp = client.auth().login_otp();

    // Step 1: request a code.
    if form.begin_submit() {
        let sent = otp.send(form.phone()).await;
        form.on_send_result(sent.is_ok());
        sent?;
    }
    info!("OTP sent to {}", form.phone());

    // Step 2: collect and verify, staying on this step until a code passes.
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

    report_session(&client, &form);
    Ok(())
}

pub(super) fn report_session(client: &Client, form: &AuthForm) {
    let action = match form.tab() {
        AuthTab::Login => "Logged in",
        AuthTab::Register => "Registered and logged in",
    };
    match client.current_user() {
        Some(user) => info!("{action} as {} ({})", user.name, user.phone),
        None => info!("{action}, but the profile could not be resolved"),
    }
}
