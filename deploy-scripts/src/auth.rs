//! Credentials and the authentication object built from them

use std::{
    fmt::{self, Debug, Formatter},
    str::FromStr,
};

use alloy::{
    primitives::Address,
    signers::{local::PrivateKeySigner, Signer},
    transports::http::reqwest::Url,
};

use crate::{
    constants::{
        INFURA_API_VERSION, INFURA_HOST_SUFFIX, INFURA_NETWORKS, PRIV_KEY_ENV_VAR,
        PROJECT_ID_ENV_VAR, SECRET_ID_ENV_VAR,
    },
    errors::ScriptError,
};

/// The credential bundle read from the environment at startup
#[derive(Clone)]
pub struct Credentials {
    /// The Infura project ID
    pub project_id: String,
    /// The Infura project secret
    pub secret_id: String,
    /// The hex-encoded private key of the deployer
    pub private_key: String,
    /// The chain to deploy to
    pub chain_id: u64,
}

impl Credentials {
    /// Fails if any credential is blank or the chain ID is zero
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (var, value) in [
            (PROJECT_ID_ENV_VAR, &self.project_id),
            (SECRET_ID_ENV_VAR, &self.secret_id),
            (PRIV_KEY_ENV_VAR, &self.private_key),
        ] {
            if value.trim().is_empty() {
                return Err(ScriptError::Configuration(format!("{var} is empty")));
            }
        }

        if self.chain_id == 0 {
            return Err(ScriptError::Configuration("chain ID must be non-zero".to_string()));
        }

        Ok(())
    }
}

// Keep secrets out of logs
impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("secret_id", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// Authentication against the Infura endpoint of a chain, along with the
/// signer used for deployment transactions
#[derive(Clone)]
pub struct Auth {
    /// The Infura project ID
    project_id: String,
    /// The Infura project secret
    secret_id: String,
    /// The deployer's signer, bound to `chain_id`
    signer: PrivateKeySigner,
    /// The chain to deploy to
    chain_id: u64,
    /// An endpoint used in place of the Infura one
    rpc_url_override: Option<Url>,
}

impl Auth {
    /// Validate the credentials and parse the signing key
    pub fn new(credentials: Credentials) -> Result<Self, ScriptError> {
        credentials.validate()?;

        let signer = PrivateKeySigner::from_str(credentials.private_key.trim())
            .map_err(|e| ScriptError::Configuration(format!("invalid private key: {e}")))?
            .with_chain_id(Some(credentials.chain_id));

        Ok(Self {
            project_id: credentials.project_id.trim().to_string(),
            secret_id: credentials.secret_id.trim().to_string(),
            signer,
            chain_id: credentials.chain_id,
            rpc_url_override: None,
        })
    }

    /// Send requests to the given endpoint instead of the Infura one
    pub fn with_rpc_url(mut self, rpc_url: &str) -> Result<Self, ScriptError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| ScriptError::Configuration(format!("invalid RPC URL: {e}")))?;
        self.rpc_url_override = Some(url);
        Ok(self)
    }

    /// The chain to deploy to
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The deployer's signer
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// The deployer's address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The JSON-RPC endpoint to deploy through.
    ///
    /// Without an override this is the Infura endpoint of the chain, with the
    /// project secret sent as the basic-auth password.
    pub fn rpc_url(&self) -> Result<Url, ScriptError> {
        if let Some(url) = &self.rpc_url_override {
            return Ok(url.clone());
        }

        let network = infura_network(self.chain_id).ok_or_else(|| {
            ScriptError::Configuration(format!(
                "no Infura endpoint for chain {}, set an RPC URL instead",
                self.chain_id
            ))
        })?;

        let mut url = Url::parse(&format!(
            "https://{network}.{INFURA_HOST_SUFFIX}/{INFURA_API_VERSION}/{}",
            self.project_id
        ))
        .map_err(|e| ScriptError::Configuration(format!("invalid project ID: {e}")))?;
        url.set_password(Some(self.secret_id.as_str()))
            .map_err(|_| ScriptError::Configuration("cannot attach project secret".to_string()))?;

        Ok(url)
    }
}

impl Debug for Auth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("project_id", &self.project_id)
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

/// The Infura network subdomain serving the given chain
pub fn infura_network(chain_id: u64) -> Option<&'static str> {
    INFURA_NETWORKS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, network)| *network)
}
