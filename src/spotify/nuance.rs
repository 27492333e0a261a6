use data_encoding::Specification;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

use crate::{Error, Res};

const TOTP_PERIOD_SECS: u64 = 30;
const TOTP_DIGITS: u32 = 6;
const BASE32_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// One entry of the rotating secret feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nuance {
    /// Version reported to the token endpoint as `totpVer`.
    pub v: u32,
    /// Base32 TOTP secret.
    pub s: String,
}

/// Highest version wins; on a tie the first entry in feed order is kept.
pub fn latest_nuance(nuances: Vec<Nuance>) -> Res<Nuance> {
    nuances
        .into_iter()
        .reduce(|best, n| if n.v > best.v { n } else { best })
        .ok_or(Error::NoNuance)
}

/// Decodes an RFC 4648 base32 secret, ignoring case, padding and whitespace.
pub fn decode_secret(secret: &str) -> Res<Vec<u8>> {
    let cleaned: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let mut spec = Specification::new();
    spec.symbols.push_str(BASE32_ALPHABET);
    spec.check_trailing_bits = false;
    let encoding = spec.encoding().map_err(|e| Error::Totp(e.to_string()))?;

    encoding
        .decode(cleaned.as_bytes())
        .map_err(|e| Error::Totp(format!("secret is not base32: {e}")))
}

/// RFC 6238 TOTP: HMAC-SHA-1 over the 30 second counter, 6 digits.
pub fn generate_totp(secret: &str, unix_time_secs: u64) -> Res<String> {
    type HmacSha1 = Hmac<Sha1>;

    let key = decode_secret(secret)?;
    let counter = unix_time_secs / TOTP_PERIOD_SECS;

    let mut mac = HmacSha1::new_from_slice(&key).map_err(|e| Error::Totp(e.to_string()))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from(digest[offset] & 0x7f) << 24
        | u32::from(digest[offset + 1]) << 16
        | u32::from(digest[offset + 2]) << 8
        | u32::from(digest[offset + 3]);

    let code = binary % 10u32.pow(TOTP_DIGITS);
    Ok(format!("{:0width$}", code, width = TOTP_DIGITS as usize))
}
