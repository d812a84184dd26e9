use crate::errors::DomainError;

const MAX_NAME_LEN: usize = 253;

/// A query on the JSON resolution path (`/resolve?name=..&type=..`).
///
/// The record type is kept as the caller's token (`"A"`, `"AAAA"`, `"65"`)
/// and handed to the upstream JSON API as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonQuery {
    pub name: String,
    pub record_type: String,
    pub dnssec_ok: bool,
    pub checking_disabled: bool,
}

impl JsonQuery {
    pub fn new(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            dnssec_ok: false,
            checking_disabled: false,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.name.trim_end_matches('.');
        if name.is_empty() && self.name != "." {
            return Err(DomainError::InvalidRequest("name cannot be empty".to_string()));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidRequest(format!(
                "name exceeds {} characters",
                MAX_NAME_LEN
            )));
        }
        if self.record_type.is_empty()
            || !self.record_type.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(DomainError::InvalidRequest(format!(
                "invalid record type: {:?}",
                self.record_type
            )));
        }
        Ok(())
    }
}
