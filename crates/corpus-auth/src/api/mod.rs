//! Wire-level request and response models. These are private to the crate;
//! the public surface uses the request types defined next to each flow.

pub(crate) mod request;
pub(crate) mod response;

use corpus_core::{ApiError, client::ApiConfiguration};
use serde::Serialize;

/// POSTs a JSON payload to an identity endpoint and returns the raw response.
///
/// Status handling is left to the caller; only transport failures surface
/// here.
pub(crate) async fn post_json<T: Serialize>(
    configuration: &ApiConfiguration,
    path: &str,
    payload: &T,
) -> Result<reqwest::Response, ApiError> {
    let response = configuration
        .client
        .post(format!("{}{}", configuration.base_path, path))
        .header(reqwest::header::ACCEPT, "application/json")
        .json(payload)
        .send()
        .await?;

    Ok(response)
}
