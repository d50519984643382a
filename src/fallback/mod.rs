pub mod request;
pub mod attempts;
pub mod executor;
pub mod strategies;

pub use request::GenerationRequest;
pub use attempts::{AttemptRecord, AttemptStatus, FallbackResponse};
pub use executor::FallbackExecutor;
pub use strategies::{Strategy, strategies, strategy};
