use std::net::IpAddr;

/// A DNS wire-format query received over DoH, together with the client
/// address learned from the trusted proxy header or the socket peer.
#[derive(Debug, Clone)]
pub struct DohRequest {
    pub message: Vec<u8>,
    pub client_ip: Option<IpAddr>,
}

impl DohRequest {
    pub fn new(message: Vec<u8>, client_ip: Option<IpAddr>) -> Self {
        Self { message, client_ip }
    }
}
