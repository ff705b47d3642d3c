//! `X-Hub-Signature-256` verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use triage::ApiCredential;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying GitHub's HMAC-SHA256 signature of the raw request body.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

/// Verifies a GitHub webhook signature.
///
/// `header` is the raw header value (`sha256=<hex digest>`). Returns `false` for
/// a missing header, a missing `sha256=` prefix, non-hex digits, or a digest
/// mismatch.
#[must_use]
pub fn verify_signature(secret: &ApiCredential, header: Option<&str>, body: &[u8]) -> bool {
    let Some(signature) = header.and_then(|h| h.trim().strip_prefix("sha256=")) else {
        return false;
    };
    let Ok(signature_bytes) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return false;
    };
    mac.update(body);
    let computed = mac.finalize().into_bytes();

    computed.as_slice().ct_eq(&signature_bytes).into()
}

/// Computes the header value GitHub would send for `body`.
#[cfg(test)]
pub(crate) fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}
