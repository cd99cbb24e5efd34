use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DELETE_REASON: &str = "CloudFormation Delete Request";

pub type ResponseData = Map<String, Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

/// Lifecycle event delivered by CloudFormation to a custom-resource handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
}

/// Status envelope PUT to the pre-signed callback URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: ResponseData,
}

/// Per-invocation facts taken from the Lambda runtime context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InvocationContext {
    pub aws_request_id: String,
    pub log_stream_name: String,
    pub function_name: String,
}

pub fn build_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
    status: ResponseStatus,
    reason: impl Into<String>,
    data: ResponseData,
) -> CustomResourceResponse {
    CustomResourceResponse {
        status,
        reason: reason.into(),
        physical_resource_id: context.log_stream_name.clone(),
        stack_id: event.stack_id.clone(),
        request_id: event.request_id.clone(),
        logical_resource_id: event.logical_resource_id.clone(),
        data,
    }
}

pub fn log_stream_reason(prefix: &str, context: &InvocationContext) -> String {
    format!("{prefix}{}", context.log_stream_name)
}

/// Every handler acknowledges deletes the same way, without outbound calls.
pub fn delete_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> CustomResourceResponse {
    let mut data = ResponseData::new();
    data.insert("Reason".to_string(), Value::from(DELETE_REASON));
    build_response(event, context, ResponseStatus::Success, DELETE_REASON, data)
}

/// FAILED envelope with no data, for invocations that could not run their handler.
pub fn failure_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
    reason: impl Into<String>,
) -> CustomResourceResponse {
    build_response(
        event,
        context,
        ResponseStatus::Failed,
        reason,
        ResponseData::new(),
    )
}

pub fn resource_property<'a>(event: &'a CustomResourceEvent, key: &str) -> Option<&'a Value> {
    event.resource_properties.get(key)
}

/// Copies the echoed inputs into `data`, skipping properties the template omitted.
pub fn echo_inputs(event: &CustomResourceEvent, data: &mut ResponseData) {
    for key in ["SystemInput", "UserInput"] {
        if let Some(value) = resource_property(event, key) {
            data.insert(key.to_string(), value.clone());
        }
    }
}
