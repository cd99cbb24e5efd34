//! Lambda runtime integration for the CloudFormation custom-resource handlers.
//!
//! This crate owns the HTTP adapters (callback PUT, word API GET), environment
//! configuration and the per-invocation flow shared by every handler binary.
//! Response shapes come from `cfn_resource_core`.

pub mod adapters;
pub mod config;
pub mod invocation;
mod logging;
