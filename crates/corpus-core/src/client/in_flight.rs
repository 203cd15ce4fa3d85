//! Per-flow in-flight tracking.
//!
//! The session is shared state mutated by asynchronous flows; two concurrent
//! requests for the same flow would apply their responses in completion order.
//! Each flow may therefore have at most one request outstanding at a time.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use thiserror::Error;

/// The auth flows that are guarded against concurrent execution.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    PasswordLogin,
    Register,
    LoginOtpSend,
    LoginOtpVerify,
    LoginOtpResend,
    SignupOtpSend,
    SignupOtpVerify,
    SignupOtpResend,
}

/// A flow was started while a previous request for the same flow was still outstanding.
#[derive(Debug, Error)]
#[error("a {0:?} request is already in flight")]
pub struct OperationInProgressError(pub Flow);

/// The set of currently executing flows.
#[derive(Debug, Default)]
pub(crate) struct FlowSet {
    active: Arc<Mutex<HashSet<Flow>>>,
}

impl FlowSet {
    /// Marks `flow` as running until the returned guard is dropped.
    pub(crate) fn begin(&self, flow: Flow) -> Result<FlowGuard, OperationInProgressError> {
        let mut active = self.active.lock().expect("Mutex is not poisoned");
        if !active.insert(flow) {
            return Err(OperationInProgressError(flow));
        }
        Ok(FlowGuard {
            set: Arc::clone(&self.active),
            flow,
        })
    }
}

/// Releases the guarded flow when dropped, including on error paths.
#[must_use = "the flow is released as soon as the guard is dropped"]
pub struct FlowGuard {
    set: Arc<Mutex<HashSet<Flow>>>,
    flow: Flow,
}

impl Drop for FlowGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .expect("Mutex is not poisoned")
            .remove(&self.flow);
    }
}
