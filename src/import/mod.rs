//! Import coordination: event stream, cancellation, sequential pass.

pub mod coordinator;
pub mod events;

pub use coordinator::{CancelHandle, ImportCoordinator};
pub use events::{EventSink, ImportEvent};
