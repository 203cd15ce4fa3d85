use std::sync::{Arc, RwLock, atomic::AtomicBool};

use corpus_state::{registry::StateRegistry, repository::{Repository, RepositoryItem}};
use reqwest::header::{self, HeaderValue};

use super::internal::InternalClient;
use crate::{
    client::{client_settings::ClientSettings, in_flight::FlowSet, internal::ApiConfiguration},
    session::User,
};

/// The main struct to interact with the corpus SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance, so that every handle observes the same session. Any
    // mutable state needs to be behind an Arc, ideally as part of the existing
    // [`InternalClient`] struct.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new corpus client.
    ///
    /// The client starts in the loading state; call
    /// [`restore_session`](Client::restore_session) to settle it.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();

        let headers = build_default_headers(&settings);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("HTTP Client build should not fail");

        let http_client = reqwest_middleware::ClientBuilder::new(http_client).build();

        let configuration = ApiConfiguration {
            base_path: settings.api_url,
            user_agent: Some(settings.user_agent),
            client: http_client,
            access_token: None,
        };

        Self {
            internal: Arc::new(InternalClient {
                user: RwLock::new(None),
                tokens: RwLock::new(None),
                is_loading: AtomicBool::new(true),
                in_flight: FlowSet::default(),
                __api_configuration: RwLock::new(Arc::new(configuration)),
                repository_map: StateRegistry::new(),
            }),
        }
    }

    /// The current user, if one has been resolved since the token was set or restored.
    pub fn current_user(&self) -> Option<User> {
        self.internal.get_user()
    }

    /// The bearer access token of the current session, if authenticated.
    pub fn access_token(&self) -> Option<String> {
        self.internal.get_access_token()
    }

    /// Whether a session operation (initial restore, login, registration) is outstanding.
    pub fn is_loading(&self) -> bool {
        self.internal.is_loading()
    }

    /// Registers a client-managed repository for the given item type.
    pub fn register_client_managed<T: RepositoryItem>(&self, repository: Arc<dyn Repository<T>>) {
        self.internal.register_client_managed(repository);
    }
}

/// Build default headers for the corpus HTTP client.
fn build_default_headers(settings: &ClientSettings) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    headers.append(
        reqwest::header::USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .expect("User agent should be a valid header value"),
    );

    headers
}
