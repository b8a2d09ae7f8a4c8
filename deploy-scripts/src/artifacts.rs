//! Loading of compiled template artifacts.
//!
//! An artifact is the JSON emitted by Hardhat or Foundry for a contract,
//! holding at least its ABI and creation bytecode. Each template is looked up
//! as `<artifacts_dir>/<template>.json`. A missing artifact is compiled from the
//! template sources embedded in the binary and cached in the artifacts
//! directory.

use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use alloy::{json_abi::ContractObject, primitives::Bytes};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::{
    constants::{
        ARTIFACT_EXTENSION, SOLC_COMMAND, SOLC_OPTIMIZER_RUNS, SOLC_STANDARD_JSON_FLAG,
        SOLIDITY_EXTENSION, TEMPLATE_SOURCES,
    },
    errors::ScriptError,
    types::Template,
};

/// The parts of a template artifact needed to deploy it
#[derive(Debug, Clone)]
pub struct TemplateArtifact {
    /// The template the artifact was compiled from
    pub template: Template,
    /// The creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl TemplateArtifact {
    /// The creation bytecode followed by the encoded constructor arguments
    pub fn deploy_code(&self, constructor_calldata: &[u8]) -> Bytes {
        [self.bytecode.as_ref(), constructor_calldata].concat().into()
    }
}

/// Load the artifact of the given template, compiling and caching it first if
/// the artifacts directory does not hold one
pub fn template_artifact(dir: &Path, template: Template) -> Result<TemplateArtifact, ScriptError> {
    let path = dir.join(template.to_string()).with_extension(ARTIFACT_EXTENSION);
    if path.exists() {
        return load_artifact(dir, template);
    }

    info!("No artifact at {}, compiling {}", path.display(), template);
    let contents = compile_template(template)?;
    let artifact = parse_artifact(&contents, template)?;

    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, &contents))
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    Ok(artifact)
}

/// Read the artifact of the given template from the artifacts directory
pub fn load_artifact(dir: &Path, template: Template) -> Result<TemplateArtifact, ScriptError> {
    let path = dir.join(template.to_string()).with_extension(ARTIFACT_EXTENSION);
    let contents = fs::read_to_string(&path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    parse_artifact(&contents, template)
}

/// Parse an artifact, checking that its constructor matches the template
pub fn parse_artifact(contents: &str, template: Template) -> Result<TemplateArtifact, ScriptError> {
    let object: ContractObject = serde_json::from_str(contents)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let abi = object
        .abi
        .ok_or_else(|| ScriptError::ArtifactParsing(format!("{template} artifact has no ABI")))?;

    let constructor_types: Vec<&str> = abi
        .constructor
        .as_ref()
        .map(|c| c.inputs.iter().map(|p| p.ty.as_str()).collect())
        .unwrap_or_default();
    if constructor_types != template.constructor_types() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{template} constructor takes ({}), expected ({})",
            constructor_types.join(", "),
            template.constructor_types().join(", ")
        )));
    }

    let bytecode = object
        .bytecode
        .filter(|b| !b.is_empty())
        .ok_or_else(|| {
            ScriptError::ArtifactParsing(format!("{template} artifact has no bytecode"))
        })?;

    Ok(TemplateArtifact { template, bytecode })
}

/// The file name the template's source is compiled under
fn source_name(template: Template) -> String {
    format!("{template}.{SOLIDITY_EXTENSION}")
}

/// The solc standard-JSON input compiling the given template
pub fn solc_input(template: Template) -> Value {
    let sources: Map<String, Value> = TEMPLATE_SOURCES
        .iter()
        .map(|(name, content)| (name.to_string(), json!({ "content": content })))
        .collect();

    json!({
        "language": "Solidity",
        "sources": sources,
        "settings": {
            "optimizer": { "enabled": true, "runs": SOLC_OPTIMIZER_RUNS },
            "outputSelection": {
                source_name(template): {
                    template.to_string(): ["abi", "evm.bytecode.object"]
                }
            }
        }
    })
}

/// Compile the given template with the local `solc`, returning the artifact
/// JSON.
///
/// Assumes a `solc` of version 0.8.20 or later is on the `PATH`.
pub fn compile_template(template: Template) -> Result<String, ScriptError> {
    let input = serde_json::to_vec(&solc_input(template))
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

    let mut solc = Command::new(SOLC_COMMAND)
        .arg(SOLC_STANDARD_JSON_FLAG)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ScriptError::ContractCompilation(format!("failed to run solc: {e}")))?;

    solc.stdin
        .take()
        .ok_or_else(|| ScriptError::ContractCompilation("solc stdin unavailable".to_string()))?
        .write_all(&input)
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

    let output = solc
        .wait_with_output()
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;
    if !output.status.success() {
        return Err(ScriptError::ContractCompilation(format!(
            "solc exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;
    parse_solc_output(&stdout, template)
}

/// Extract the template's artifact JSON from solc standard-JSON output
pub fn parse_solc_output(output: &str, template: Template) -> Result<String, ScriptError> {
    let output: Value = serde_json::from_str(output)
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?;

    let errors: Vec<&str> = output["errors"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|e| e["severity"] == "error")
        .map(|e| e["formattedMessage"].as_str().unwrap_or("unknown error"))
        .collect();
    if !errors.is_empty() {
        return Err(ScriptError::ContractCompilation(errors.join("\n")));
    }

    let contract = &output["contracts"][source_name(template)][template.to_string()];
    let bytecode = contract["evm"]["bytecode"]["object"]
        .as_str()
        .filter(|b| !b.is_empty())
        .ok_or_else(|| {
            ScriptError::ContractCompilation(format!("solc emitted no bytecode for {template}"))
        })?;

    let artifact = json!({
        "contractName": template.to_string(),
        "abi": contract["abi"],
        "bytecode": format!("0x{}", bytecode.trim_start_matches("0x")),
    });

    serde_json::to_string_pretty(&artifact)
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))
}
