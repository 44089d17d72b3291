//! Markdown to HTML through a GitHub-compatible `/markdown` endpoint.

use std::time::Duration;

use anyhow::{Context, bail};
use serde::Serialize;

#[derive(Serialize)]
struct RenderRequest<'a> {
    text: &'a str,
    mode: &'static str,
}

pub struct HtmlRenderer {
    http: reqwest::Client,
    url: String,
}

impl HtmlRenderer {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("relnotes/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTML renderer client")?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub async fn render(&self, markdown: &str) -> anyhow::Result<String> {
        let resp = self
            .http
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "text/html")
            .json(&RenderRequest {
                text: markdown,
                mode: "markdown",
            })
            .send()
            .await
            .with_context(|| format!("failed to reach renderer at {}", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("renderer returned {status}: {body}");
        }
        resp.text().await.context("failed to read rendered HTML")
    }
}
