use serde_json::Value;

use crate::contract::{
    build_response, log_stream_reason, resource_property, CustomResourceEvent,
    CustomResourceResponse, InvocationContext, ResponseData, ResponseStatus,
};

pub const REASON_PREFIX: &str = "Refer the Reason's Details at CloudWatch Log Stream: ";

/// `arn:aws:lambda:<region>:<account>:function:<name>`
const FUNCTION_NAME_SEGMENT: usize = 6;
/// `arn:aws:cloudformation:<region>:<account>:stack/<name>/<id>`
const STACK_RESOURCE_SEGMENT: usize = 5;

/// Reasons the event's ARNs could not be broken down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArnError {
    MissingServiceToken,
    TooFewSegments {
        field: &'static str,
        required: usize,
        found: usize,
    },
}

impl std::fmt::Display for ArnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingServiceToken => f.write_str("event is missing ServiceToken"),
            Self::TooFewSegments {
                field,
                required,
                found,
            } => write!(
                f,
                "{field} has {found} ':'-separated segments, expected at least {required}"
            ),
        }
    }
}

impl std::error::Error for ArnError {}

/// Reports how the invoking stack and function are named, split into the
/// pieces templates usually want via `Fn::GetAtt`.
pub fn event_context_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> CustomResourceResponse {
    match event_context_data(event, context) {
        Ok(data) => build_response(
            event,
            context,
            ResponseStatus::Success,
            log_stream_reason(REASON_PREFIX, context),
            data,
        ),
        Err(error) => build_response(
            event,
            context,
            ResponseStatus::Failed,
            format!(
                "{error}. {}",
                log_stream_reason(REASON_PREFIX, context)
            ),
            ResponseData::new(),
        ),
    }
}

pub fn event_context_data(
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> Result<ResponseData, ArnError> {
    let service_token = service_token(event).ok_or(ArnError::MissingServiceToken)?;
    let token_segments: Vec<&str> = service_token.split(':').collect();
    let stack_segments: Vec<&str> = event.stack_id.split(':').collect();

    let function_name = segment(&token_segments, FUNCTION_NAME_SEGMENT, "ServiceToken")?;
    let stack_resource = segment(&stack_segments, STACK_RESOURCE_SEGMENT, "StackId")?;

    let mut data = ResponseData::new();
    data.insert("ServiceToken".to_string(), string_array(&token_segments));
    data.insert("StackId".to_string(), string_array(&stack_segments));
    data.insert(
        "FunctionName".to_string(),
        string_array(&function_name.split('-').collect::<Vec<_>>()),
    );
    data.insert(
        "StackName".to_string(),
        string_array(&stack_resource.split('/').collect::<Vec<_>>()),
    );
    data.insert(
        "EventRequestID".to_string(),
        Value::from(event.request_id.clone()),
    );
    data.insert(
        "ContextRequestID".to_string(),
        Value::from(context.aws_request_id.clone()),
    );
    Ok(data)
}

fn service_token(event: &CustomResourceEvent) -> Option<&str> {
    event
        .service_token
        .as_deref()
        .or_else(|| resource_property(event, "ServiceToken").and_then(Value::as_str))
}

fn segment<'a>(
    segments: &[&'a str],
    index: usize,
    field: &'static str,
) -> Result<&'a str, ArnError> {
    segments
        .get(index)
        .copied()
        .ok_or(ArnError::TooFewSegments {
            field,
            required: index + 1,
            found: segments.len(),
        })
}

fn string_array(parts: &[&str]) -> Value {
    Value::Array(parts.iter().map(|part| Value::from(*part)).collect())
}
