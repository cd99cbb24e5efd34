use cfn_resource_lambda::config::{env_lookup, handler_kind_from_lookup};
use cfn_resource_lambda::invocation::HandlerRuntime;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

/// Single artifact for every handler; `CUSTOM_RESOURCE_HANDLER` picks which.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let runtime = HandlerRuntime::from_lookup(handler_kind_from_lookup(env_lookup), env_lookup)
        .map_err(|error| Error::from(error.to_string()))?;
    let runtime = &runtime;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        runtime.handle(event).await
    }))
    .await
}
