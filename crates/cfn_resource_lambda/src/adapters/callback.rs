use std::future::Future;
use std::time::Duration;

use cfn_resource_core::contract::CustomResourceResponse;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// Delivers the status envelope to CloudFormation's pre-signed callback URL.
pub trait ResponseSender {
    /// Returns the HTTP status code of the callback on success.
    fn send_response(
        &self,
        url: &str,
        response: &CustomResourceResponse,
    ) -> impl Future<Output = Result<u16, CallbackError>> + Send;
}

/// Errors encountered while reporting back to CloudFormation.
#[derive(Debug)]
pub enum CallbackError {
    Client(reqwest::Error),
    Serialize(serde_json::Error),
    Http(reqwest::Error),
    Status(u16),
}

impl std::fmt::Display for CallbackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(error) => write!(f, "failed to build callback client: {error}"),
            Self::Serialize(error) => write!(f, "failed to serialize response body: {error}"),
            Self::Http(error) => write!(f, "callback request failed: {error}"),
            Self::Status(code) => write!(f, "callback rejected with status {code}"),
        }
    }
}

impl std::error::Error for CallbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Client(error) | Self::Http(error) => Some(error),
            Self::Serialize(error) => Some(error),
            Self::Status(_) => None,
        }
    }
}

/// PUTs the JSON envelope with an empty `content-type`, which the pre-signed
/// S3 URL's signature expects.
#[derive(Debug, Clone)]
pub struct HttpResponseSender {
    client: Client,
}

impl HttpResponseSender {
    pub fn new(timeout: Duration) -> Result<Self, CallbackError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CallbackError::Client)?;
        Ok(Self { client })
    }
}

impl ResponseSender for HttpResponseSender {
    async fn send_response(
        &self,
        url: &str,
        response: &CustomResourceResponse,
    ) -> Result<u16, CallbackError> {
        let body = serde_json::to_vec(response).map_err(CallbackError::Serialize)?;
        let reply = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .map_err(CallbackError::Http)?;

        let status = reply.status();
        if !status.is_success() {
            return Err(CallbackError::Status(status.as_u16()));
        }
        Ok(status.as_u16())
    }
}
