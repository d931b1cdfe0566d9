use crate::error::ScopeError;
use crate::sample::Sample;
use std::sync::Arc;

/// All messages (events) that can flow into the application.
///
/// Sources:
/// - UDP receive loop    → `SampleReceived`, `ReceiverFailed`
/// - Config watcher task → `ConfigReloaded`
#[derive(Debug, Clone)]
pub enum Message {
    /// A datagram decoded to a number.
    SampleReceived(Sample),
    /// The receive loop hit a fatal error and stopped.
    ReceiverFailed(Arc<ScopeError>),
    /// Config file changed on disk.
    ConfigReloaded,
}
