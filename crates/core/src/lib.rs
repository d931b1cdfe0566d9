pub mod buffer;
pub mod error;
pub mod event;
pub mod sample;

pub use buffer::{SampleBuffer, TrimPolicy};
pub use error::{Result, ScopeError};
pub use event::Message;
pub use sample::{MalformedPolicy, Sample};
