//! API host selection
//!
//! Serverspace runs one API endpoint per partner. API keys start with a
//! two character partner code, which is enough to pick the endpoint when
//! no host is configured explicitly.

use crate::config::{ConfigError, Result};

/// Partner code to API endpoint
pub const PARTNER_HOSTS: [(&str, &str); 7] = [
    ("02", "https://api.serverspace.by"),
    ("04", "https://api.serverspace.io"),
    ("06", "https://api.serverspace.ru"),
    ("07", "https://api.lincore.kz"),
    ("08", "https://api.serverspace.us"),
    ("09", "https://api.serverspace.com.tr"),
    ("0a", "https://api.serverspace.in"),
];

/// Lowercased partner code of an API key
pub fn partner_code(api_key: &str) -> String {
    api_key.chars().take(2).collect::<String>().to_lowercase()
}

/// Endpoint matching the key's partner code, if the code is known
pub fn host_for_api_key(api_key: &str) -> Option<&'static str> {
    let code = partner_code(api_key);
    PARTNER_HOSTS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, host)| *host)
}

/// Pick the API host: an explicit, non-empty host wins over the key's partner code
pub fn resolve_host(explicit: Option<&str>, api_key: &str) -> Result<String> {
    if let Some(host) = explicit.map(str::trim).filter(|h| !h.is_empty()) {
        return Ok(host.to_string());
    }
    host_for_api_key(api_key)
        .map(str::to_string)
        .ok_or_else(|| ConfigError::UnknownPartnerCode {
            code: partner_code(api_key),
        })
}
