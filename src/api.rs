use anyhow::Context;
use log::info;
use reqwest::StatusCode;
use scraper::{ElementRef, Html};
use thiserror::Error;
use url::Url;

use crate::parser::{self, VersionColours};

pub const WIKI_URL: &str = "https://minecraft.gamepedia.com/Map_item_format";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.190 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unexpected response from {url}: server returned {status}")]
    UnexpectedResponse { url: Url, status: StatusCode },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Downloads the wiki page once and answers structural queries against it.
pub struct PageScraper {
    client: reqwest::Client,
    url: Url,
    text: Option<String>,
    document: Option<Html>,
}

impl PageScraper {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_url(Url::parse(WIKI_URL)?)
    }

    pub fn with_url(url: Url) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connection_verbose(true)
            .build()?;
        Ok(Self {
            client,
            url,
            text: None,
            document: None,
        })
    }

    /// A scraper over an already downloaded page.  It never touches the network.
    pub fn from_html(text: String) -> anyhow::Result<Self> {
        let mut res = Self::new()?;
        res.text = Some(text);
        Ok(res)
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        info!("Fetching {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::UnexpectedResponse {
                url: self.url.clone(),
                status: response.status(),
            });
        }
        Ok(response.text().await?)
    }

    pub async fn text(&mut self) -> Result<&str, FetchError> {
        let text = match self.text.take() {
            Some(text) => text,
            None => self.fetch().await?,
        };
        Ok(self.text.insert(text))
    }

    pub async fn document(&mut self) -> Result<&Html, FetchError> {
        let document = match self.document.take() {
            Some(document) => document,
            None => Html::parse_document(self.text().await?),
        };
        Ok(self.document.insert(document))
    }

    pub async fn captions(&mut self) -> Result<Vec<ElementRef<'_>>, FetchError> {
        Ok(parser::find_captions(self.document().await?))
    }

    pub async fn tables(&mut self) -> anyhow::Result<Vec<ElementRef<'_>>> {
        let captions = self.captions().await?;
        Ok(parser::find_tables(&captions)?)
    }

    pub async fn colour_versions(&mut self) -> anyhow::Result<Vec<VersionColours>> {
        let url = self.url.clone();
        let versions = parser::parse_colour_versions(self.document().await?)
            .with_context(|| format!("While parsing palette tables of {url}"))?;
        info!("Found {} palette table(s)", versions.len());
        Ok(versions)
    }
}
