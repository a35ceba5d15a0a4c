//! `Basic` authorization header codec.
//!
//! Decoding is total: malformed input produces a credential that cannot
//! verify (empty username or password), never an error. Scheme validation
//! is the engine's responsibility, not the codec's.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::credentials::Credential;

/// Decodes a `Basic <base64>` header value into a credential.
///
/// The value is split on the first space into scheme and token; the token is
/// base64-decoded and split on the first `:`. A token without a colon yields
/// an all-in-username, empty-password credential; invalid base64 yields an
/// empty credential. Verification rejects both downstream.
pub fn decode(header_value: &str) -> Credential {
    let token = header_value.split_once(' ').map_or("", |(_, token)| token);
    let bytes = STANDARD.decode(token).unwrap_or_default();
    let decoded = String::from_utf8_lossy(&bytes);
    match decoded.split_once(':') {
        Some((username, password)) => Credential::new(username, password),
        None => Credential::new(decoded.as_ref(), ""),
    }
}

/// Encodes a credential pair as a `Basic <base64>` header value.
pub fn encode(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_token() {
        // base64 of "admin:admin"
        let credential = decode("Basic YWRtaW46YWRtaW4=");
        assert_eq!(credential, Credential::new("admin", "admin"));
    }

    #[test]
    fn round_trip() {
        let credential = decode(&encode("user", "s3cret!"));
        assert_eq!(credential, Credential::new("user", "s3cret!"));
    }

    #[test]
    fn password_keeps_extra_colons() {
        let credential = decode(&encode("user", "pa:ss:wd"));
        assert_eq!(credential, Credential::new("user", "pa:ss:wd"));
    }

    #[test]
    fn token_without_colon_goes_all_in_username() {
        let token = STANDARD.encode("justauser");
        let credential = decode(&format!("Basic {token}"));
        assert_eq!(credential, Credential::new("justauser", ""));
    }

    #[test]
    fn invalid_base64_yields_empty_credential() {
        let credential = decode("Basic %%%not-base64%%%");
        assert_eq!(credential, Credential::new("", ""));
    }

    #[test]
    fn missing_token_yields_empty_credential() {
        assert_eq!(decode("Basic"), Credential::new("", ""));
        assert_eq!(decode(""), Credential::new("", ""));
    }
}
