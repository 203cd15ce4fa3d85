use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the target and behavior of the
/// corpus client. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use corpus_core::ClientSettings;
/// let settings = ClientSettings {
///     api_url: "https://api.corpus.swecha.org/api/v1".to_string(),
///     user_agent: "Corpus Rust-SDK".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The base url of the targeted corpus API. Defaults to `https://api.corpus.swecha.org/api/v1`
    pub api_url: String,
    /// The user_agent to send to the server. Defaults to `Corpus Rust-SDK`
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.corpus.swecha.org/api/v1".into(),
            user_agent: "Corpus Rust-SDK".into(),
        }
    }
}
