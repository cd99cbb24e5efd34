use std::future::Future;
use std::time::Duration;

use cfn_resource_core::handlers::random_word::extract_word;
use reqwest::Client;

pub const DEFAULT_WORD_API_URL: &str = "https://random-word-api.herokuapp.com/word?number=1";

pub trait WordSource {
    fn fetch_word(&self) -> impl Future<Output = Result<String, WordFetchError>> + Send;
}

/// Errors encountered while asking the word API for a word.
#[derive(Debug)]
pub enum WordFetchError {
    Client(reqwest::Error),
    Http(reqwest::Error),
    Status(u16),
    NoWord(String),
}

impl std::fmt::Display for WordFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(error) => write!(f, "failed to build word API client: {error}"),
            Self::Http(error) => write!(f, "word API request failed: {error}"),
            Self::Status(code) => write!(f, "word API returned status {code}"),
            Self::NoWord(body) => write!(f, "word API body contained no quoted word: {body}"),
        }
    }
}

impl std::error::Error for WordFetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(error) | Self::Http(error) => Some(error),
            Self::Status(_) | Self::NoWord(_) => None,
        }
    }
}

/// Thin HTTP client for a random-word endpoint returning `["word"]`.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: Client,
    endpoint: String,
}

impl HttpWordSource {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, WordFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WordFetchError::Client)?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl WordSource for HttpWordSource {
    async fn fetch_word(&self) -> Result<String, WordFetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(WordFetchError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordFetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(WordFetchError::Http)?;
        match extract_word(&body) {
            Some(word) => Ok(word.to_string()),
            None => Err(WordFetchError::NoWord(body)),
        }
    }
}

/// Word source for handlers that never fetch one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWordSource;

impl WordSource for NoWordSource {
    async fn fetch_word(&self) -> Result<String, WordFetchError> {
        Err(WordFetchError::NoWord(String::new()))
    }
}
