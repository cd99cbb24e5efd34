//! CloudFormation custom-resource domain primitives.
//!
//! This crate owns the event/response envelopes and the pure per-handler
//! response logic. It intentionally excludes HTTP and Lambda runtime concerns;
//! those live in `cfn_resource_lambda`.

pub mod contract;
pub mod handlers;
