use chrono::Utc;
use rand::Rng;
use regex::Regex;

use crate::{Res, host::Cookie};

/// Value of the first cookie named `name`.
pub fn cookie_value<'a>(cookies: &'a [Cookie], name: &str) -> Option<&'a str> {
    cookies
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.value.as_str())
}

/// Parses a `Cookie` header style string (`a=1; b=2`) into cookies.
/// Segments without `=` or with an empty name are skipped.
pub fn parse_cookie_header(header: &str) -> Vec<Cookie> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Cookie::new(name, value.trim()))
        })
        .collect()
}

/// `length` random bytes rendered as lowercase hex.
pub fn random_hex(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect()
}

/// Throwaway user agent accepted by the token endpoint:
/// epoch millis, a random multiple of 1000 below 100000, then 32 hex chars.
pub fn random_user_agent() -> String {
    let bucket = rand::rng().random_range(0..100u32) * 1000;
    format!(
        "{}{}{}",
        Utc::now().timestamp_millis(),
        bucket,
        random_hex(16)
    )
}

/// Pattern matching the accounts page reached after a successful login.
pub fn login_status_pattern(accounts_url: &str) -> Res<Regex> {
    Ok(Regex::new(&format!(
        "(?i){}.*/?status",
        regex::escape(accounts_url)
    ))?)
}

/// Strips a single trailing slash.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}
