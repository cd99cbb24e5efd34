use std::str::FromStr;

use cfn_resource_core::contract::{
    delete_response, failure_response, CustomResourceEvent, CustomResourceResponse,
    InvocationContext, RequestType, ResponseStatus,
};
use cfn_resource_core::handlers::event_context::event_context_response;
use cfn_resource_core::handlers::random_word::{random_word_delete_response, random_word_response};
use cfn_resource_core::handlers::skeleton::skeleton_response;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::callback::{CallbackError, HttpResponseSender, ResponseSender};
use crate::adapters::word_source::{HttpWordSource, NoWordSource, WordSource};
use crate::config::{CallbackConfig, ConfigError, WordApiConfig};
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "custom_resource";
const SETUP_FAILURE_PREFIX: &str = "Handler configuration error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Skeleton,
    EventContext,
    RandomWord,
}

impl HandlerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skeleton => "skeleton",
            Self::EventContext => "event_context",
            Self::RandomWord => "random_word",
        }
    }
}

impl FromStr for HandlerKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "skeleton" => Ok(Self::Skeleton),
            "event_context" => Ok(Self::EventContext),
            "random_word" => Ok(Self::RandomWord),
            other => Err(ConfigError::new(format!(
                "unknown custom resource handler '{other}', expected skeleton, event_context or random_word"
            ))),
        }
    }
}

/// Returned to the Lambda runtime once the callback has been attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationSummary {
    pub status: ResponseStatus,
    pub callback_status_code: Option<u16>,
}

/// Builds the handler's response, PUTs it to the event's callback URL and
/// waits for the PUT to settle. Callback failures are logged, not returned.
pub async fn run_invocation(
    kind: HandlerKind,
    event: &CustomResourceEvent,
    context: &InvocationContext,
    sender: &impl ResponseSender,
    words: &impl WordSource,
) -> InvocationSummary {
    log_request(Some(kind), event, context);
    let response = build_handler_response(kind, event, context, words).await;
    deliver(event, &response, sender).await
}

fn log_request(kind: Option<HandlerKind>, event: &CustomResourceEvent, context: &InvocationContext) {
    log_info(
        COMPONENT,
        "request_received",
        json!({
            "handler": kind.map(HandlerKind::as_str),
            "event": event,
            "context": context,
        }),
    );
}

async fn deliver(
    event: &CustomResourceEvent,
    response: &CustomResourceResponse,
    sender: &impl ResponseSender,
) -> InvocationSummary {
    log_info(COMPONENT, "response_composed", json!({ "body": response }));

    let callback_status_code = match sender.send_response(&event.response_url, response).await {
        Ok(status_code) => {
            log_info(
                COMPONENT,
                "response_sent",
                json!({
                    "request_id": event.request_id.as_str(),
                    "status": response.status.as_str(),
                    "status_code": status_code,
                }),
            );
            Some(status_code)
        }
        Err(error) => {
            log_error(
                COMPONENT,
                "response_failed",
                json!({
                    "request_id": event.request_id.as_str(),
                    "error": error.to_string(),
                }),
            );
            None
        }
    };

    InvocationSummary {
        status: response.status,
        callback_status_code,
    }
}

fn delete_response_for(
    kind: Option<HandlerKind>,
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> CustomResourceResponse {
    match kind {
        Some(HandlerKind::RandomWord) => random_word_delete_response(event, context),
        _ => delete_response(event, context),
    }
}

async fn build_handler_response(
    kind: HandlerKind,
    event: &CustomResourceEvent,
    context: &InvocationContext,
    words: &impl WordSource,
) -> CustomResourceResponse {
    if event.request_type == RequestType::Delete {
        return delete_response_for(Some(kind), event, context);
    }

    match kind {
        HandlerKind::Skeleton => skeleton_response(event, context),
        HandlerKind::EventContext => event_context_response(event, context),
        HandlerKind::RandomWord => {
            let word = match words.fetch_word().await {
                Ok(word) => Some(word),
                Err(error) => {
                    log_error(
                        COMPONENT,
                        "word_fetch_failed",
                        json!({ "error": error.to_string() }),
                    );
                    None
                }
            };
            random_word_response(event, context, word.as_deref())
        }
    }
}

pub fn invocation_context(context: &lambda_runtime::Context) -> InvocationContext {
    InvocationContext {
        aws_request_id: context.request_id.clone(),
        log_stream_name: context.env_config.log_stream.clone(),
        function_name: context.env_config.function_name.clone(),
    }
}

/// Clients and settings resolved once per Lambda container.
///
/// A bad setting does not stop the container: it is kept as `setup_error`
/// and reported to CloudFormation as a FAILED response on every Create or
/// Update, while Deletes still succeed.
#[derive(Debug)]
pub struct HandlerRuntime {
    kind: Option<HandlerKind>,
    sender: HttpResponseSender,
    words: Option<HttpWordSource>,
    setup_error: Option<String>,
}

impl HandlerRuntime {
    /// Fails only when no callback client can be built at all, since then
    /// nothing could be reported anyway.
    pub fn from_lookup(
        kind: Result<HandlerKind, ConfigError>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CallbackError> {
        let mut setup_errors = Vec::new();

        let kind = match kind {
            Ok(kind) => Some(kind),
            Err(error) => {
                setup_errors.push(error.to_string());
                None
            }
        };

        let callback = match CallbackConfig::from_lookup(&lookup) {
            Ok(config) => config,
            Err(error) => {
                setup_errors.push(error.to_string());
                CallbackConfig::default()
            }
        };
        let sender = HttpResponseSender::new(callback.timeout)?;

        let words = if kind == Some(HandlerKind::RandomWord) {
            let source = WordApiConfig::from_lookup(&lookup)
                .map_err(|error| error.to_string())
                .and_then(|config| {
                    HttpWordSource::new(&config.url, config.timeout)
                        .map_err(|error| error.to_string())
                });
            match source {
                Ok(source) => Some(source),
                Err(message) => {
                    setup_errors.push(message);
                    None
                }
            }
        } else {
            None
        };

        let setup_error = (!setup_errors.is_empty()).then(|| setup_errors.join("; "));
        if let Some(message) = &setup_error {
            log_error(COMPONENT, "setup_failed", json!({ "error": message }));
        }

        Ok(Self {
            kind,
            sender,
            words,
            setup_error,
        })
    }

    pub fn setup_error(&self) -> Option<&str> {
        self.setup_error.as_deref()
    }

    /// Lambda entry point. Only an undecodable payload is returned as an
    /// error; without a parsed event there is no callback URL to report to.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<InvocationSummary, Error> {
        let context = invocation_context(&event.context);
        let payload: CustomResourceEvent = serde_json::from_value(event.payload)
            .map_err(|error| Error::from(format!("invalid custom resource event: {error}")))?;
        Ok(self.respond(&payload, &context).await)
    }

    pub async fn respond(
        &self,
        event: &CustomResourceEvent,
        context: &InvocationContext,
    ) -> InvocationSummary {
        if let (Some(kind), None) = (self.kind, &self.setup_error) {
            return match &self.words {
                Some(words) => run_invocation(kind, event, context, &self.sender, words).await,
                None => run_invocation(kind, event, context, &self.sender, &NoWordSource).await,
            };
        }

        log_request(self.kind, event, context);
        let response = if event.request_type == RequestType::Delete {
            delete_response_for(self.kind, event, context)
        } else {
            let reason = self
                .setup_error
                .as_deref()
                .unwrap_or("no custom resource handler selected");
            failure_response(event, context, format!("{SETUP_FAILURE_PREFIX}{reason}"))
        };
        deliver(event, &response, &self.sender).await
    }
}
