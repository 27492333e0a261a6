use chrono::Utc;
use tabled::{Table, Tabled};

use crate::{error, info, success, warning};

use super::{native_auth, spinner};

#[derive(Tabled)]
struct StatusRow {
    field: &'static str,
    value: String,
}

/// Keeps enough of a token to tell two apart without leaking it.
fn mask(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((idx, _)) => format!("{}…", &token[..idx]),
        None if token.is_empty() => "(empty)".to_string(),
        None => "…".to_string(),
    }
}

pub async fn login() {
    let auth = match native_auth().await {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up authentication. Err: {}", e),
    };

    info!("Opening the Spotify login page...");
    if let Err(e) = auth.authenticate().await {
        error!("Login failed. Err: {}", e);
    }

    match auth.credentials().and_then(|c| c.expires_at()) {
        Some(expires_at) => success!("Logged in, token valid until {}", expires_at),
        None => success!("Logged in"),
    }
}

pub async fn logout() {
    let auth = match native_auth().await {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up authentication. Err: {}", e),
    };

    match auth.logout().await {
        Ok(_) => success!("Logged out"),
        Err(e) => error!("Failed to remove stored credentials. Err: {}", e),
    }
}

pub async fn refresh() {
    let auth = match native_auth().await {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up authentication. Err: {}", e),
    };

    if auth.credentials().is_none() {
        warning!("Not logged in. Please run spotube-spotify auth login");
        return;
    }

    let pb = spinner("Refreshing access token...");
    let result = auth.refresh_credentials().await;
    pb.finish_and_clear();

    match result {
        Ok(_) => success!("Access token refreshed"),
        Err(e) => error!("Failed to refresh access token. Err: {}", e),
    }
}

pub async fn status() {
    let auth = match native_auth().await {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up authentication. Err: {}", e),
    };

    let Some(credentials) = auth.credentials() else {
        warning!("Not logged in. Please run spotube-spotify auth login");
        return;
    };

    let now = Utc::now();
    let expires_at = credentials
        .expires_at()
        .map_or_else(|| "unknown".to_string(), |t| t.to_rfc3339());
    let cookies = credentials
        .cookies
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let rows = vec![
        StatusRow {
            field: "state",
            value: format!("{:?}", auth.state()),
        },
        StatusRow {
            field: "expired",
            value: credentials.is_expired_at(now).to_string(),
        },
        StatusRow {
            field: "expires at",
            value: expires_at,
        },
        StatusRow {
            field: "refresh in (s)",
            value: (credentials.expiration_duration_at(now) / 1000).to_string(),
        },
        StatusRow {
            field: "cookies",
            value: cookies,
        },
        StatusRow {
            field: "access token",
            value: mask(&credentials.access_token),
        },
    ];

    println!("{}", Table::new(rows));
}

pub async fn token() {
    let auth = match native_auth().await {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up authentication. Err: {}", e),
    };

    match auth.access_token() {
        Some(token) if !token.is_empty() => println!("{token}"),
        Some(_) => warning!("The stored access token is empty"),
        None => warning!("Not logged in. Please run spotube-spotify auth login"),
    }
}
