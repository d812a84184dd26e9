mod upstream;
mod use_cases;

pub use upstream::Upstreams;
pub use use_cases::UseCases;
