use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Lowercase hex HMAC-SHA1 of the canonical query string, keyed by the
/// account secret. The service recomputes this digest over the identical
/// bytes, so the query string must not be re-encoded after signing.
pub(crate) fn sign(secret: &str, query: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(query.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}
