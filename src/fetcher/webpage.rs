use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use super::{Document, PageLoader, SourceLabel};
use crate::config::Config;
use crate::error::{AppError, Result};

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

const SKIPPED_ELEMENTS: [&str; 6] = ["script", "style", "noscript", "template", "head", "svg"];

const BLOCK_ELEMENTS: [&str; 26] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "main", "nav", "p", "pre",
    "section", "table", "tr",
];

/// Loads a webpage over HTTP and extracts its visible text as one document.
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(config: &Config) -> Result<Self> {
        if !config.page_tls_verify {
            tracing::warn!("TLS certificate verification is disabled for page loading");
        }

        let client = ClientBuilder::new()
            .timeout(config.http_timeout)
            .connect_timeout(connect_timeout(config.http_timeout))
            .danger_accept_invalid_certs(!config.page_tls_verify)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &Url) -> Result<Vec<Document>> {
        let html = fetch_html(&self.client, url).await?;
        let text = extract_text(&html);

        if text.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![Document::new(text, SourceLabel::Website)])
    }
}

/// Connect phase is capped at five seconds but never outlives the request timeout.
pub fn connect_timeout(http_timeout: Duration) -> Duration {
    http_timeout.min(MAX_CONNECT_TIMEOUT)
}

pub async fn fetch_html(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.as_str()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch(format!("{} returned HTTP {}", url, status)));
    }

    let html = response.text().await?;
    Ok(html)
}

/// Visible text of the page body, one block per line.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::with_capacity(html.len() / 2);
    collect_text(root, &mut raw);
    normalize_lines(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }

            let is_block = BLOCK_ELEMENTS.contains(&name);
            if is_block {
                out.push('\n');
            }
            collect_text(child_element, out);
            if is_block {
                out.push('\n');
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// Trims every line, collapses inner whitespace runs and drops blank lines.
pub fn normalize_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(&words.join(" "));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_text_without_scripts() {
        let html = r#"<html>
            <head><title>Ignored</title><style>p { color: red }</style></head>
            <body>
                <h1>Headline</h1>
                <script>var tracking = 1;</script>
                <p>First   paragraph with <a href="/x">a link</a>.</p>
                <p>Second paragraph.</p>
            </body>
        </html>"#;

        let text = extract_text(html);
        assert_eq!(
            text,
            "Headline\nFirst paragraph with a link.\nSecond paragraph."
        );
    }

    #[test]
    fn empty_body_yields_empty_text() {
        assert_eq!(extract_text("<html><body>  \n </body></html>"), "");
        assert_eq!(extract_text("<body><script>only()</script></body>"), "");
    }

    #[test]
    fn adjacent_blocks_do_not_run_together() {
        let text = extract_text("<div>one</div><div>two</div><ul><li>three</li><li>four</li></ul>");
        assert_eq!(text, "one\ntwo\nthree\nfour");
    }

    #[test]
    fn connect_timeout_follows_short_request_timeouts() {
        assert_eq!(connect_timeout(Duration::from_secs(2)), Duration::from_secs(2));
        assert_eq!(connect_timeout(Duration::from_secs(30)), Duration::from_secs(5));
    }

    #[test]
    fn normalize_lines_drops_blank_lines() {
        assert_eq!(normalize_lines("  a \n\n\t\n  b   c  \n"), "a\nb c");
        assert_eq!(normalize_lines(""), "");
    }
}
