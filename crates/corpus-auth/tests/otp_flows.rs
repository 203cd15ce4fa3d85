//! Integration tests for the OTP login and signup flows

use std::sync::Arc;

use corpus_auth::{
    AuthClientExt,
    login::OtpError,
    signup::{RegisterError, RegisterRequest, SignupOtpSendRequest},
};
use corpus_core::{Client, ClientSettings, session::PersistedToken};
use corpus_state::repository::Repository;
use corpus_test::{MemoryRepository, start_api_mock};
use wiremock::{Mock, ResponseTemplate, matchers};

const TOKEN_KEY: &str = "accessToken";
const PHONE: &str = "8888888888";

fn user_body() -> serde_json::Value {
    serde_json::json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "phone": PHONE,
        "name": "Ravi",
        "email": "ravi@example.com",
        "is_active": true,
        "has_given_consent": false,
        "created_at": "2025-02-01T00:00:00Z",
        "updated_at": "2025-02-01T00:00:00Z"
    })
}

fn make_client(settings: ClientSettings) -> (Client, Arc<MemoryRepository<PersistedToken>>) {
    let client = Client::new(Some(settings));
    let repository = Arc::new(MemoryRepository::default());
    client.register_client_managed(
        Arc::clone(&repository) as Arc<dyn Repository<PersistedToken>>
    );
    (client, repository)
}

fn signup_request() -> SignupOtpSendRequest {
    SignupOtpSendRequest {
        username: "ravi".into(),
        email: "ravi@example.com".into(),
        password: "hunter2".into(),
        phone: PHONE.into(),
    }
}

mod login_otp_tests {
    use super::*;

    #[tokio::test]
    async fn send_accepts_without_touching_the_session() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/send-otp"))
            .and(matchers::body_json(serde_json::json!({ "phone": PHONE })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success"
            })));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        client
            .auth()
            .login_otp()
            .send(PHONE)
            .await
            .expect("dispatch should be accepted");

        assert_eq!(client.access_token(), None);
        assert_eq!(client.current_user(), None);
    }

    #[tokio::test]
    async fn send_rejection_is_reported() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/send-otp"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such account"));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        let result = client.auth().login_otp().send(PHONE).await;

        assert!(matches!(
            result,
            Err(OtpError::Rejected { status, ref message })
                if status.as_u16() == 404 && message == "no such account"
        ));
    }

    #[tokio::test]
    async fn verify_completes_the_login() {
        let verify_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/verify-otp"))
            .and(matchers::body_json(serde_json::json!({
                "phone": PHONE,
                "otp": "123456"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "OTP_TOKEN" })),
            );
        let me_mock = Mock::given(matchers::method("GET"))
            .and(matchers::path("/auth/me"))
            .and(matchers::header("Authorization", "Bearer OTP_TOKEN"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()));

        let (_server, settings) = start_api_mock(vec![verify_mock, me_mock]).await;
        let (client, repository) = make_client(settings);

        client
            .auth()
            .login_otp()
            .verify(PHONE, "123456")
            .await
            .expect("verification should succeed");

        assert_eq!(client.access_token().as_deref(), Some("OTP_TOKEN"));
        assert_eq!(
            client.current_user().expect("user should be resolved").phone,
            PHONE
        );
        assert_eq!(
            repository
                .get(TOKEN_KEY.to_owned())
                .await
                .expect("repository get should succeed"),
            Some(PersistedToken {
                access_token: "OTP_TOKEN".into()
            })
        );
    }

    #[tokio::test]
    async fn failed_verification_leaves_the_session_unauthenticated() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/verify-otp"))
            .respond_with(ResponseTemplate::new(400));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        let result = client.auth().login_otp().verify(PHONE, "000000").await;

        assert!(matches!(result, Err(OtpError::InvalidOtp)));
        assert_eq!(client.access_token(), None);
        assert_eq!(client.current_user(), None);
    }

    #[tokio::test]
    async fn resend_uses_the_resend_endpoint() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/login/resend-otp"))
            .and(matchers::body_json(serde_json::json!({ "phone": PHONE })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success"
            })));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        client
            .auth()
            .login_otp()
            .resend(PHONE)
            .await
            .expect("re-dispatch should be accepted");
    }
}

mod signup_otp_tests {
    use super::*;

    #[tokio::test]
    async fn send_submits_the_new_account_fields() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/signup/send-otp"))
            .and(matchers::body_json(serde_json::json!({
                "username": "ravi",
                "email": "ravi@example.com",
                "password": "hunter2",
                "phone": PHONE
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success"
            })));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        client
            .auth()
            .signup_otp()
            .send(&signup_request())
            .await
            .expect("dispatch should be accepted");

        assert_eq!(client.access_token(), None);
    }

    #[tokio::test]
    async fn verify_authenticates_the_new_account() {
        let verify_mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/signup/verify-otp"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "NEW_TOKEN" })),
            );
        let me_mock = Mock::given(matchers::method("GET"))
            .and(matchers::path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()));

        let (_server, settings) = start_api_mock(vec![verify_mock, me_mock]).await;
        let (client, repository) = make_client(settings);

        client
            .auth()
            .signup_otp()
            .verify(PHONE, "654321")
            .await
            .expect("verification should succeed");

        assert_eq!(client.access_token().as_deref(), Some("NEW_TOKEN"));
        assert!(
            repository
                .get(TOKEN_KEY.to_owned())
                .await
                .expect("repository get should succeed")
                .is_some()
        );
    }

    #[tokio::test]
    async fn resend_uses_the_signup_resend_endpoint() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/signup/resend-otp"))
            .and(matchers::body_json(serde_json::json!({ "phone": PHONE })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success"
            })));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        client
            .auth()
            .signup_otp()
            .resend(PHONE)
            .await
            .expect("re-dispatch should be accepted");
    }
}

mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn registration_succeeds_without_authenticating() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/register"))
            .and(matchers::body_json(serde_json::json!({
                "username": "ravi",
                "email": "ravi@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "status": "created"
            })));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, repository) = make_client(settings);

        client
            .auth()
            .register(&RegisterRequest {
                username: "ravi".into(),
                email: "ravi@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .expect("registration should be accepted");

        assert_eq!(client.access_token(), None);
        assert_eq!(client.current_user(), None);
        assert_eq!(
            repository
                .get(TOKEN_KEY.to_owned())
                .await
                .expect("repository get should succeed"),
            None
        );
    }

    #[tokio::test]
    async fn rejected_registration_is_reported() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/auth/register"))
            .respond_with(ResponseTemplate::new(409).set_body_string("username taken"));

        let (_server, settings) = start_api_mock(vec![mock]).await;
        let (client, _repository) = make_client(settings);

        let result = client
            .auth()
            .register(&RegisterRequest {
                username: "ravi".into(),
                email: "ravi@example.com".into(),
                password: "hunter2".into(),
            })
            .await;

        assert!(matches!(
            result,
            Err(RegisterError::Rejected { status, .. }) if status.as_u16() == 409
        ));
    }
}
