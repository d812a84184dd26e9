pub mod client_ip;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use client_ip::{ClientAddr, ClientIpExtractor};
pub use routes::create_api_routes;
pub use state::AppState;
