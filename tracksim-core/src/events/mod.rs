//! Progress events for long-running builds and prediction runs.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::TracksimEventHandler;
pub use types::*;
