use cfn_resource_lambda::config::env_lookup;
use cfn_resource_lambda::invocation::{HandlerKind, HandlerRuntime};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let runtime = HandlerRuntime::from_lookup(Ok(HandlerKind::Skeleton), env_lookup)
        .map_err(|error| Error::from(error.to_string()))?;
    let runtime = &runtime;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        runtime.handle(event).await
    }))
    .await
}
