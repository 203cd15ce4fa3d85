//! Persistence of the session's bearer token.
//!
//! The token is the only piece of session state that survives restarts. It is
//! written through whatever repository the embedding application registered;
//! with no repository registered the session is simply not persisted.

use corpus_state::register_repository_item;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Client;

/// Key under which the token is stored in the registered repository.
const ACCESS_TOKEN_KEY: &str = "accessToken";

/// The persisted form of a session's bearer token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PersistedToken {
    /// The bearer access token granted by the identity API.
    pub access_token: String,
}

register_repository_item!(PersistedToken, "PersistedToken");

pub(crate) async fn save(client: &Client, access_token: String) {
    let Some(repository) = client.internal.get_repository::<PersistedToken>() else {
        debug!("no token repository registered, skipping persistence");
        return;
    };
    if let Err(e) = repository
        .set(ACCESS_TOKEN_KEY.to_owned(), PersistedToken { access_token })
        .await
    {
        warn!("failed to persist access token: {e}");
    }
}

pub(crate) async fn load(client: &Client) -> Option<PersistedToken> {
    let repository = client.internal.get_repository::<PersistedToken>()?;
    match repository.get(ACCESS_TOKEN_KEY.to_owned()).await {
        Ok(token) => token,
        Err(e) => {
            warn!("failed to load persisted access token: {e}");
            None
        }
    }
}

pub(crate) async fn clear(client: &Client) {
    let Some(repository) = client.internal.get_repository::<PersistedToken>() else {
        return;
    };
    if let Err(e) = repository.remove(ACCESS_TOKEN_KEY.to_owned()).await {
        warn!("failed to clear persisted access token: {e}");
    }
}
