use serde_json::Value;

use crate::contract::{
    build_response, echo_inputs, log_stream_reason, CustomResourceEvent, CustomResourceResponse,
    InvocationContext, ResponseData, ResponseStatus,
};

pub const REASON_PREFIX: &str = "See the details in CloudWatch Log Stream: ";
pub const PLACEHOLDER_REASON: &str = "Called to Generate Random Word";
pub const PLACEHOLDER_RESULT: &str = "Result Word";

/// Answers Create/Update with the resource inputs echoed back and a fixed
/// placeholder result. Useful as a template for new handlers.
pub fn skeleton_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> CustomResourceResponse {
    let mut data = ResponseData::new();
    echo_inputs(event, &mut data);
    data.insert("Reason".to_string(), Value::from(PLACEHOLDER_REASON));
    data.insert("Result".to_string(), Value::from(PLACEHOLDER_RESULT));

    build_response(
        event,
        context,
        ResponseStatus::Success,
        log_stream_reason(REASON_PREFIX, context),
        data,
    )
}
