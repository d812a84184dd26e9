use async_trait::async_trait;
use doh_relay_domain::{ClientSubnet, DomainError, JsonQuery};

#[derive(Debug, Clone)]
pub struct JsonAnswer {
    pub body: Vec<u8>,
    pub content_type: String,
    pub server: String,
}

#[async_trait]
pub trait JsonResolver: Send + Sync {
    async fn resolve(
        &self,
        query: &JsonQuery,
        subnet: Option<ClientSubnet>,
    ) -> Result<JsonAnswer, DomainError>;
}
