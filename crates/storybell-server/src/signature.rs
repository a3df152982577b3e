//! Inbound webhook signature verification
//!
//! Clubhouse signs payloads with HMAC-SHA256 and sends the hex digest in
//! the Clubhouse-Signature header.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify an inbound payload signature.
///
/// Comparison happens inside the Mac so it is constant time.
pub fn verify(secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Hex HMAC-SHA256 digest of a payload.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_round_trip() {
        let signature = sign("test-secret", b"test payload");
        assert_eq!(signature.len(), 64);
        assert!(verify("test-secret", b"test payload", &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signature = sign("test-secret", b"test payload");
        assert!(!verify("other-secret", b"test payload", &signature));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let signature = sign("test-secret", b"test payload");
        assert!(!verify("test-secret", b"tampered payload", &signature));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        assert!(!verify("test-secret", b"test payload", "not hex at all"));
    }
}
