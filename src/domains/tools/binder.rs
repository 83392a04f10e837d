//! Argument Binder - projects a keyed payload onto positional arguments.
//!
//! Values are passed through unconverted: the protocol layer has already
//! validated them against the published schema. The binder only restores
//! declaration order and substitutes declared defaults.

use rmcp::model::JsonObject;
use serde_json::Value;
use thiserror::Error;

use crate::domains::catalog::ParameterSpec;

/// Binding stopped at a required parameter the payload does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required parameter `{0}` was not provided")]
pub struct BindError(pub String);

/// A payload value, treating explicit `null` as absent.
fn lookup<'a>(payload: &'a JsonObject, name: &str) -> Option<&'a Value> {
    payload.get(name).filter(|value| !value.is_null())
}

/// Produce the positional argument list for a call.
///
/// Absent parameters take their declared default; an absent required
/// parameter fails the whole bind.
pub fn bind(params: &[ParameterSpec], payload: &JsonObject) -> Result<Vec<Value>, BindError> {
    params
        .iter()
        .map(|param| match (lookup(payload, param.name), &param.default) {
            (Some(value), _) => Ok(value.clone()),
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(BindError(param.name.to_string())),
        })
        .collect()
}

/// Names of required parameters absent from the payload, in declaration order.
pub fn missing_required(params: &[ParameterSpec], payload: &JsonObject) -> Vec<String> {
    params
        .iter()
        .filter(|param| param.is_required() && lookup(payload, param.name).is_none())
        .map(|param| param.name.to_string())
        .collect()
}
