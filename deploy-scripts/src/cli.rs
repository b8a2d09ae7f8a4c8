//! Configuration of the deploy script.
//!
//! Every option is read from the environment, so running the script with no
//! arguments performs the default deployment. Flags override the environment.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{
    auth::{Auth, Credentials},
    commands::deploy,
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CHAIN_ID, NUM_DEPLOY_CONFIRMATIONS, PRIV_KEY_ENV_VAR,
        PROJECT_ID_ENV_VAR, SECRET_ID_ENV_VAR,
    },
    errors::ScriptError,
    sdk::{Sdk, SdkOptions},
    types::DeployRequest,
};

/// Deploy an ERC1155 mintable contract template and print its address
#[derive(Parser)]
pub struct Cli {
    /// Infura project ID
    #[arg(long, env = PROJECT_ID_ENV_VAR, hide_env_values = true)]
    pub project_id: String,

    /// Infura project secret
    #[arg(long, env = SECRET_ID_ENV_VAR, hide_env_values = true)]
    pub secret_id: String,

    /// Private key of the deployer
    #[arg(long, env = PRIV_KEY_ENV_VAR, hide_env_values = true)]
    pub priv_key: String,

    /// Chain to deploy to
    #[arg(long, env = "CHAIN_ID", default_value_t = DEFAULT_CHAIN_ID)]
    pub chain_id: u64,

    /// Network RPC URL, defaults to the Infura endpoint of the chain
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Directory containing the compiled template artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// JSON file in which to record the deployed address
    #[arg(long, env = "DEPLOYMENTS_PATH")]
    pub deployments_path: Option<PathBuf>,

    /// Number of confirmations to wait for the creation transaction
    #[arg(long, env = "NUM_CONFIRMATIONS", default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,
}

impl Cli {
    /// The credential bundle given on the command line or in the environment
    pub fn credentials(&self) -> Credentials {
        Credentials {
            project_id: self.project_id.clone(),
            secret_id: self.secret_id.clone(),
            private_key: self.priv_key.clone(),
            chain_id: self.chain_id,
        }
    }

    /// Build the SDK client from the configuration.
    ///
    /// Fails without touching the network if the configuration is unusable.
    pub fn sdk(&self) -> Result<Sdk, ScriptError> {
        let mut auth = Auth::new(self.credentials())?;
        if let Some(rpc_url) = &self.rpc_url {
            auth = auth.with_rpc_url(rpc_url)?;
        }

        let options = SdkOptions {
            artifacts_dir: self.artifacts_dir.clone(),
            confirmations: self.confirmations,
        };

        Sdk::new(auth, options)
    }

    /// Perform the deployment.
    ///
    /// Only configuration errors are returned; the outcome of the deployment
    /// itself is logged.
    pub async fn run(self) -> Result<(), ScriptError> {
        let sdk = self.sdk()?;
        info!("Deployer address: {:#x}", sdk.auth().address());

        deploy(
            &sdk,
            DeployRequest::mintable_multi_token(),
            self.deployments_path.as_deref(),
        )
        .await;

        Ok(())
    }
}
