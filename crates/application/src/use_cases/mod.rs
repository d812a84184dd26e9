mod relay_dns_message;
mod resolve_json;

pub use relay_dns_message::{RelayDnsMessageUseCase, MAX_DNS_MESSAGE_LEN};
pub use resolve_json::ResolveJsonUseCase;
