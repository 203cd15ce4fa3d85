//! Pure state for the two-tab auth form.
//!
//! The login and register tabs share one wizard: step 1 collects the
//! identifying fields and requests an OTP, step 2 collects the code and
//! verifies it. Switching tabs always returns the wizard to step 1.

/// The two tabs of the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Which inputs the form is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WizardStep {
    /// Step 1: the identifying fields, submitted to request an OTP.
    Details,
    /// Step 2: the one-time code, submitted for verification.
    EnterOtp,
}

/// A named form field, set one input at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Username,
    Email,
    Phone,
    Password,
    Otp,
}

/// Transient per-invocation form state, never persisted.
#[derive(Debug, Default)]
pub(crate) struct AuthForm {
    username: String,
    email: String,
    phone: String,
    password: String,
    otp: String,

    tab: AuthTab,
    otp_sent: bool,
    submitting: bool,
}

impl AuthForm {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Username => self.username = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Password => self.password = value,
            Field::Otp => self.otp = value,
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn phone(&self) -> &str {
        &self.phone
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn otp(&self) -> &str {
        &self.otp
    }

    /// Selecting a tab always returns the wizard to the details step.
    pub(crate) fn switch_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
        self.otp_sent = false;
    }

    pub(crate) fn tab(&self) -> AuthTab {
        self.tab
    }

    pub(crate) fn step(&self) -> WizardStep {
        if self.otp_sent {
            WizardStep::EnterOtp
        } else {
            WizardStep::Details
        }
    }

    /// Claims the submit lock. Returns false while a request is outstanding,
    /// blocking a second submission.
    pub(crate) fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Records the outcome of the step-1 dispatch request.
    pub(crate) fn on_send_result(&mut self, sent: bool) {
        self.submitting = false;
        if sent {
            self.otp_sent = true;
        }
    }

    /// Records the outcome of the step-2 verification request.
    pub(crate) fn on_verify_result(&mut self, verified: bool) {
        self.submitting = false;
        if verified {
            self.otp_sent = false;
        }
    }

    /// Re-dispatch is only offered while the form is on the OTP step.
    pub(crate) fn can_resend(&self) -> bool {
        self.otp_sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_send_advances_to_the_otp_step() {
        let mut form = AuthForm::new();
        assert_eq!(form.step(), WizardStep::Details);

        assert!(form.begin_submit());
        form.on_send_result(true);

        assert_eq!(form.step(), WizardStep::EnterOtp);
        assert!(form.can_resend());
    }

    #[test]
    fn failed_send_stays_on_the_details_step() {
        let mut form = AuthForm::new();

        assert!(form.begin_submit());
        form.on_send_result(false);

        assert_eq!(form.step(), WizardStep::Details);
        assert!(!form.can_resend());
    }

    #[test]
    fn successful_verification_returns_to_the_details_step() {
        let mut form = AuthForm::new();
        form.begin_submit();
        form.on_send_result(true);

        form.set_field(Field::Otp, "123456".into());
        assert!(form.begin_submit());
        form.on_verify_result(true);

        assert_eq!(form.step(), WizardStep::Details);
    }

    #[test]
    fn failed_verification_stays_on_the_otp_step() {
        let mut form = AuthForm::new();
        form.begin_submit();
        form.on_send_result(true);

        form.begin_submit();
        form.on_verify_result(false);

        assert_eq!(form.step(), WizardStep::EnterOtp);
        assert!(form.can_resend());
    }

    #[test]
    fn switching_tabs_always_resets_the_wizard() {
        let mut form = AuthForm::new();
        form.begin_submit();
        form.on_send_result(true);
        assert_eq!(form.step(), WizardStep::EnterOtp);

        form.switch_tab(AuthTab::Register);
        assert_eq!(form.tab(), AuthTab::Register);
        assert_eq!(form.step(), WizardStep::Details);

        // Re-selecting the active tab resets as well.
        form.begin_submit();
        form.on_send_result(true);
        form.switch_tab(AuthTab::Register);
        assert_eq!(form.step(), WizardStep::Details);
    }

    #[test]
    fn submit_lock_blocks_a_second_submission() {
        let mut form = AuthForm::new();

        assert!(form.begin_submit());
        assert!(!form.begin_submit());

        form.on_send_result(true);
        assert!(form.begin_submit());
    }

    #[test]
    fn fields_are_set_by_name() {
        let mut form = AuthForm::new();
        form.set_field(Field::Username, "asha".into());
        form.set_field(Field::Email, "asha@example.com".into());
        form.set_field(Field::Phone, "9999999999".into());
        form.set_field(Field::Password, "hunter2".into());
        form.set_field(Field::Otp, "123456".into());

        assert_eq!(form.username(), "asha");
        assert_eq!(form.email(), "asha@example.com");
        assert_eq!(form.phone(), "9999999999");
        assert_eq!(form.password(), "hunter2");
        assert_eq!(form.otp(), "123456");
    }
}
