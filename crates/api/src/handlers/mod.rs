pub mod dns_query;
pub mod health;
pub mod resolve;

pub use dns_query::{dns_query_get, dns_query_post};
pub use health::health_check;
pub use resolve::resolve;
