//! Session state operations.
//!
//! The session is the single source of truth for authentication state. It is
//! mutated here and by the auth flows in `corpus-auth`, which call
//! [`establish`] after the server grants an access token.

mod current_user;
mod persisted_token;

pub use current_user::User;
pub(crate) use current_user::fetch_current_user;
pub use persisted_token::PersistedToken;

use tracing::{debug, instrument};

use crate::Client;

impl Client {
    /// Restores a previously persisted session, if any.
    ///
    /// Reads the persisted token from the registered repository. If one is
    /// found it is set into the session and the current user is resolved; a
    /// rejected or failed lookup clears the token again, from both state and
    /// storage. Returns whether the session ended up authenticated. The
    /// loading flag is settled on every exit path.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> bool {
        let authenticated = match persisted_token::load(self).await {
            Some(persisted) => {
                debug!("restoring persisted session");
                self.internal.set_tokens(persisted.access_token);
                fetch_current_user(self).await.is_ok()
            }
            None => false,
        };
        self.internal.set_loading(false);
        authenticated
    }

    /// Clears the user, the token and the persisted token.
    ///
    /// Never fails and is idempotent; repository errors are logged and
    /// swallowed. No network call is made.
    pub async fn logout(&self) {
        drop_session(self).await;
        debug!("session cleared");
    }
}

/// Adopts a freshly granted access token: stores it in the session, persists
/// it, and resolves the current user.
///
/// A failed user lookup silently downgrades the session to unauthenticated;
/// the token grant that led here has already succeeded, and callers report
/// that success.
pub async fn establish(client: &Client, access_token: String) {
    client.internal.set_tokens(access_token.clone());
    persisted_token::save(client, access_token).await;
    let _ = fetch_current_user(client).await;
}

/// Clears user and token from state and the persisted token from storage.
pub(crate) async fn drop_session(client: &Client) {
    client.internal.set_user(None);
    client.internal.clear_tokens();
    persisted_token::clear(client).await;
}
