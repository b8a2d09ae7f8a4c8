//! Utilities for recording deployed addresses in a JSON deployments file

use std::{fs, path::Path, str::FromStr};

use alloy::primitives::Address;
use serde_json::{Map, Value};

use crate::errors::ScriptError;

fn read_deployments(path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    match serde_json::from_str(&contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ScriptError::ReadDeployments(format!(
            "{} is not a JSON object",
            path.display()
        ))),
        Err(e) => Err(ScriptError::ReadDeployments(e.to_string())),
    }
}

/// Read the address stored under `key` in the deployments file
pub fn read_deployment(path: &Path, key: &str) -> Result<Address, ScriptError> {
    let deployments = read_deployments(path)?;

    let addr_str = deployments
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ScriptError::ReadDeployments(format!("key {key} not found")))?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Store `address` under `key` in the deployments file, creating the file if
/// needed and keeping all other entries
pub fn write_deployment(path: &Path, key: &str, address: Address) -> Result<(), ScriptError> {
    let mut deployments = if path.exists() {
        read_deployments(path)?
    } else {
        Map::new()
    };

    deployments.insert(key.to_string(), Value::String(format!("{address:#x}")));

    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}
