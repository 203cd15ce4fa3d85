use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};

use corpus_state::{
    registry::StateRegistry,
    repository::{Repository, RepositoryItem},
};
use tracing::debug;

use crate::{
    client::in_flight::{Flow, FlowGuard, FlowSet, OperationInProgressError},
    session::User,
};

/// Base path, HTTP client and bearer token used for every call to the corpus API.
#[derive(Clone)]
pub struct ApiConfiguration {
    #[allow(missing_docs)]
    pub base_path: String,
    /// HTTP client with middleware support, shared by all requests.
    pub client: reqwest_middleware::ClientWithMiddleware,
    /// Bearer token sent on authenticated requests.
    pub access_token: Option<String>,
    #[allow(missing_docs)]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ApiConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfiguration")
            .field("base_path", &self.base_path)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ApiConfiguration {
    fn set_token(self: &mut Arc<Self>, access_token: Option<String>) {
        let mut configuration = (**self).clone();
        configuration.access_token = access_token;
        *self = Arc::new(configuration);
    }
}

#[allow(missing_docs)]
pub struct InternalClient {
    pub(crate) user: RwLock<Option<User>>,
    pub(crate) tokens: RwLock<Option<String>>,
    pub(crate) is_loading: AtomicBool,
    pub(crate) in_flight: FlowSet,

    /// Use get_api_configuration() to access this.
    #[doc(hidden)]
    pub(crate) __api_configuration: RwLock<Arc<ApiConfiguration>>,

    pub(crate) repository_map: StateRegistry,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("tokens", &"<Tokens>")
            .field("is_loading", &self.is_loading)
            .field("__api_configuration", &self.__api_configuration)
            .finish_non_exhaustive()
    }
}

impl InternalClient {
    /// The current user, if one has been resolved since the token was set or restored.
    pub fn get_user(&self) -> Option<User> {
        self.user.read().expect("RwLock is not poisoned").clone()
    }

    pub(crate) fn set_user(&self, user: Option<User>) {
        *self.user.write().expect("RwLock is not poisoned") = user;
    }

    /// The bearer access token of the current session, if authenticated.
    pub fn get_access_token(&self) -> Option<String> {
        self.tokens.read().expect("RwLock is not poisoned").clone()
    }

    /// Whether a session operation (initial restore, login, registration) is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    /// Marks a session operation as started or finished.
    pub fn set_loading(&self, loading: bool) {
        self.is_loading.store(loading, Ordering::SeqCst);
    }

    /// Marks a flow as running, failing fast if a request for it is already outstanding.
    pub fn begin_flow(&self, flow: Flow) -> Result<FlowGuard, OperationInProgressError> {
        self.in_flight.begin(flow)
    }

    #[allow(missing_docs)]
    pub fn get_api_configuration(&self) -> Arc<ApiConfiguration> {
        self.__api_configuration
            .read()
            .expect("RwLock is not poisoned")
            .clone()
    }

    pub(crate) fn set_tokens(&self, token: String) {
        debug!("setting session token");
        *self.tokens.write().expect("RwLock is not poisoned") = Some(token.clone());

        self.__api_configuration
            .write()
            .expect("RwLock is not poisoned")
            .set_token(Some(token));
    }

    pub(crate) fn clear_tokens(&self) {
        *self.tokens.write().expect("RwLock is not poisoned") = None;

        self.__api_configuration
            .write()
            .expect("RwLock is not poisoned")
            .set_token(None);
    }

    /// Retrieves the repository registered for the given item type, if any.
    pub fn get_repository<T: RepositoryItem>(&self) -> Option<Arc<dyn Repository<T>>> {
        self.repository_map.get_client_managed()
    }

    /// Registers a client-managed repository for the given item type.
    pub fn register_client_managed<T: RepositoryItem>(&self, repository: Arc<dyn Repository<T>>) {
        self.repository_map.register_client_managed(repository);
    }
}
