use serde_json::Value;

use crate::contract::{
    build_response, delete_response, echo_inputs, log_stream_reason, CustomResourceEvent,
    CustomResourceResponse, InvocationContext, ResponseData, ResponseStatus,
};

pub const REASON_PREFIX: &str = "Refer the Reason's Details at CloudWatch Log Stream: ";
pub const WORD_REASON: &str = "Call to Generate Random Word";
/// Result reported when no word could be fetched.
pub const FALLBACK_RESULT: &str = "E-R-R-O-R";

/// Pulls the word out of a `["word"]` style body: everything between the
/// first and the last double quote.
pub fn extract_word(body: &str) -> Option<&str> {
    let start = body.find('"')? + 1;
    let end = body.rfind('"')?;
    if end <= start {
        return None;
    }
    Some(&body[start..end])
}

/// A failed fetch still reports SUCCESS; the stack sees the fallback result
/// instead of rolling back.
pub fn random_word_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
    word: Option<&str>,
) -> CustomResourceResponse {
    let mut data = ResponseData::new();
    data.insert(
        "Result".to_string(),
        Value::from(word.unwrap_or(FALLBACK_RESULT)),
    );
    echo_inputs(event, &mut data);
    data.insert("Reason".to_string(), Value::from(WORD_REASON));

    build_response(
        event,
        context,
        ResponseStatus::Success,
        log_stream_reason(REASON_PREFIX, context),
        data,
    )
}

/// Deletes carry the fallback result too, so `Fn::GetAtt Result` resolves
/// during rollback.
pub fn random_word_delete_response(
    event: &CustomResourceEvent,
    context: &InvocationContext,
) -> CustomResourceResponse {
    let mut response = delete_response(event, context);
    response
        .data
        .insert("Result".to_string(), Value::from(FALLBACK_RESULT));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::test_support::{sample_context, sample_event};

    #[test]
    fn extracts_word_from_json_array_body() {
        assert_eq!(extract_word("[\"lantern\"]"), Some("lantern"));
        assert_eq!(extract_word("[\"lantern\"]\n"), Some("lantern"));
    }

    #[test]
    fn extract_spans_first_to_last_quote() {
        assert_eq!(extract_word("[\"one\",\"two\"]"), Some("one\",\"two"));
    }

    #[test]
    fn extract_rejects_bodies_without_a_quoted_word() {
        assert_eq!(extract_word("[]"), None);
        assert_eq!(extract_word("[\"]"), None);
        assert_eq!(extract_word("[\"\"]"), None);
        assert_eq!(extract_word(""), None);
    }

    #[test]
    fn reports_fetched_word() {
        let response =
            random_word_response(&sample_event("Create"), &sample_context(), Some("lantern"));

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.data["Result"], "lantern");
        assert_eq!(response.data["Reason"], WORD_REASON);
        assert_eq!(response.data["UserInput"], "user-value");
        assert!(response.reason.starts_with(REASON_PREFIX));
    }

    #[test]
    fn missing_word_reports_fallback_but_succeeds() {
        let response = random_word_response(&sample_event("Update"), &sample_context(), None);

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.data["Result"], FALLBACK_RESULT);
    }

    #[test]
    fn delete_keeps_fallback_result_alongside_delete_reason() {
        let response = random_word_delete_response(&sample_event("Delete"), &sample_context());

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.reason, crate::contract::DELETE_REASON);
        assert_eq!(response.data["Reason"], crate::contract::DELETE_REASON);
        assert_eq!(response.data["Result"], FALLBACK_RESULT);
    }
}
