//! Corpus SDK Client

#[allow(clippy::module_inception)]
mod client;
#[allow(missing_docs)]
pub mod client_settings;
#[allow(missing_docs)]
pub mod in_flight;
#[allow(missing_docs)]
pub mod internal;

pub use client::Client;
pub use client_settings::ClientSettings;
pub use in_flight::{Flow, FlowGuard, OperationInProgressError};
pub use internal::ApiConfiguration;
