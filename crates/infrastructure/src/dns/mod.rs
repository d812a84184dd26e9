pub mod ecs;
pub mod json;
pub mod transport;

pub use ecs::{EcsInjector, PassthroughInjector};
pub use json::JsonHttpResolver;
pub use transport::{FailoverTransport, HttpsTransport};
