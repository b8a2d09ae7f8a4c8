//! Definitions of errors that can occur while deploying a contract template

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Missing or malformed configuration
    Configuration(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading or parsing a compiled template artifact
    ArtifactParsing(String),
    /// Error compiling a template from source
    ContractCompilation(String),
    /// The parameter bundle does not fit the selected template
    InvalidParams(String),
    /// Error ABI-encoding the constructor arguments
    CalldataConstruction(String),
    /// The RPC endpoint serves a different chain than the one configured
    ChainMismatch {
        /// The configured chain ID
        expected: u64,
        /// The chain ID reported by the endpoint
        actual: u64,
    },
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Configuration(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contract: {}", s),
            ScriptError::InvalidParams(s) => write!(f, "invalid template params: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ChainMismatch { expected, actual } => write!(
                f,
                "chain mismatch: configured chain {}, endpoint serves chain {}",
                expected, actual
            ),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
        }
    }
}

impl Error for ScriptError {}
