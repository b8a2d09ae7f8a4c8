//! The client through which templates are deployed

use std::path::PathBuf;

use alloy::{
    network::{Ethereum, TransactionBuilder},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
};
use tracing::{debug, info};

use crate::{
    artifacts::template_artifact,
    auth::Auth,
    constants::{DEFAULT_ARTIFACTS_DIR, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
    solidity::constructor_calldata,
    types::{DeployRequest, DeployedContract},
};

/// Something that can deploy a contract template
#[allow(async_fn_in_trait)]
pub trait Deployer {
    /// Deploy one instance of the requested template
    async fn deploy(&self, request: DeployRequest) -> Result<DeployedContract, ScriptError>;
}

/// Options of the [`Sdk`] that are not part of the credentials
#[derive(Debug, Clone)]
pub struct SdkOptions {
    /// The directory containing the compiled template artifacts
    pub artifacts_dir: PathBuf,
    /// The number of confirmations to wait for the creation transaction
    pub confirmations: u64,
}

impl Default for SdkOptions {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            confirmations: NUM_DEPLOY_CONFIRMATIONS,
        }
    }
}

/// Deploys templates through a signing JSON-RPC provider
pub struct Sdk {
    /// The credentials the provider was built from
    auth: Auth,
    /// A provider signing with the deployer's key
    provider: DynProvider<Ethereum>,
    /// Artifact and confirmation settings
    options: SdkOptions,
}

impl Sdk {
    /// Build a client from the given authentication object.
    ///
    /// No request is made until a deployment is issued.
    pub fn new(auth: Auth, options: SdkOptions) -> Result<Self, ScriptError> {
        let url = auth
            .rpc_url()
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        let provider = ProviderBuilder::new()
            .wallet(auth.signer().clone())
            .connect_http(url);

        Ok(Self {
            auth,
            provider: DynProvider::new(provider),
            options,
        })
    }

    /// The authentication object the client was built from
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Check that the endpoint serves the configured chain
    async fn check_chain_id(&self) -> Result<(), ScriptError> {
        let actual = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

        let expected = self.auth.chain_id();
        if actual != expected {
            return Err(ScriptError::ChainMismatch { expected, actual });
        }

        Ok(())
    }
}

impl Deployer for Sdk {
    async fn deploy(&self, request: DeployRequest) -> Result<DeployedContract, ScriptError> {
        request.validate()?;

        let artifact = template_artifact(&self.options.artifacts_dir, request.template)?;
        let calldata = constructor_calldata(&request.params)?;

        self.check_chain_id().await?;

        info!(
            "Deploying {} from {:#x} on chain {}",
            request.template,
            self.auth.address(),
            self.auth.chain_id()
        );

        let tx = TransactionRequest::default()
            .with_from(self.auth.address())
            .with_deploy_code(artifact.deploy_code(&calldata));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        debug!("Creation transaction sent: {:#x}", pending.tx_hash());

        let receipt = pending
            .with_required_confirmations(self.options.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "creation transaction {:#x} reverted",
                receipt.transaction_hash
            )));
        }

        let contract_address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt of {:#x} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract {
            template: request.template,
            contract_address,
            transaction_hash: receipt.transaction_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{
        artifacts::tests::ERC1155_ARTIFACT,
        auth::tests::test_credentials,
        types::{Erc721MintableParams, Template, TemplateParams},
    };

    /// An endpoint nothing listens on, so any request fails
    const DEAD_RPC_URL: &str = "http://127.0.0.1:1";

    fn test_sdk(artifacts_dir: PathBuf) -> Sdk {
        let auth = Auth::new(test_credentials())
            .unwrap()
            .with_rpc_url(DEAD_RPC_URL)
            .unwrap();
        let options = SdkOptions {
            artifacts_dir,
            ..Default::default()
        };

        Sdk::new(auth, options).unwrap()
    }

    #[test]
    fn test_new_makes_no_request() {
        let sdk = Sdk::new(Auth::new(test_credentials()).unwrap(), SdkOptions::default());
        assert!(sdk.is_ok());
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let mut credentials = test_credentials();
        credentials.chain_id = 424242;
        let auth = Auth::new(credentials).unwrap();

        assert!(matches!(
            Sdk::new(auth, SdkOptions::default()),
            Err(ScriptError::ClientInitialization(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_params_rejected_before_network() {
        let sdk = test_sdk(PathBuf::from(DEFAULT_ARTIFACTS_DIR));
        let request = DeployRequest {
            template: Template::Erc1155Mintable,
            params: TemplateParams::Erc721Mintable(Erc721MintableParams {
                name: "Test".to_string(),
                symbol: "TST".to_string(),
                contract_uri: "ipfs://contract".to_string(),
            }),
        };

        assert!(matches!(
            sdk.deploy(request).await,
            Err(ScriptError::InvalidParams(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_artifact_rejected_before_network() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ERC1155Mintable.json"), "{ not json").unwrap();
        let sdk = test_sdk(dir.path().to_path_buf());

        assert!(matches!(
            sdk.deploy(DeployRequest::mintable_multi_token()).await,
            Err(ScriptError::ArtifactParsing(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ERC1155Mintable.json"), ERC1155_ARTIFACT).unwrap();
        let sdk = test_sdk(dir.path().to_path_buf());

        assert!(matches!(
            sdk.deploy(DeployRequest::mintable_multi_token()).await,
            Err(ScriptError::ClientInitialization(_))
        ));
    }
}
