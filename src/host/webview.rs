use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::{Cookie, WebView, WebViewFactory};
use crate::{Error, Res, utils};

/// Terminal stand-in for an embedded browser view.
///
/// A terminal cannot read another browser's cookie jar, so the view opens the
/// login page in the system browser and asks the user to paste the session
/// cookies (`sp_dc=...; sp_t=...`). Once pasted, it reports a navigation to
/// the accounts status page, which is what an embedded view sees after a
/// successful login.
pub struct BrowserWebView {
    url: String,
    accounts_url: String,
    cookies: Option<Vec<Cookie>>,
    finished: bool,
}

impl BrowserWebView {
    pub fn factory(accounts_url: String) -> BrowserWebViewFactory {
        BrowserWebViewFactory { accounts_url }
    }

    fn status_url(&self) -> String {
        format!("{}/en/status", self.accounts_url.trim_end_matches('/'))
    }
}

pub struct BrowserWebViewFactory {
    accounts_url: String,
}

#[async_trait]
impl WebViewFactory for BrowserWebViewFactory {
    async fn create(&self, url: &str) -> Res<Box<dyn WebView>> {
        Ok(Box::new(BrowserWebView {
            url: url.to_string(),
            accounts_url: self.accounts_url.clone(),
            cookies: None,
            finished: false,
        }))
    }
}

#[async_trait]
impl WebView for BrowserWebView {
    async fn open(&mut self) -> Res<()> {
        if webbrowser::open(&self.url).is_err() {
            warn!(url = %self.url, "Failed to open browser");
            println!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                self.url
            );
        }
        println!(
            "Log in, then paste your open.spotify.com cookies (e.g. `sp_dc=...; sp_t=...`) and press enter. Leave empty to cancel."
        );
        Ok(())
    }

    async fn next_url(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.finished = true;

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        if let Err(e) = reader.read_line(&mut line).await {
            warn!(error = %e, "Cannot read cookies from stdin");
            return None;
        }

        let cookies = utils::parse_cookie_header(&line);
        if cookies.is_empty() {
            return None;
        }
        self.cookies = Some(cookies);
        Some(self.status_url())
    }

    async fn cookies(&mut self, _url: &str) -> Res<Vec<Cookie>> {
        self.cookies
            .clone()
            .ok_or_else(|| Error::WebView("no cookies captured".to_string()))
    }

    async fn close(&mut self) -> Res<()> {
        self.finished = true;
        Ok(())
    }
}
