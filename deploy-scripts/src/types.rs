//! Type definitions used throughout the deploy script

use std::fmt::{self, Display};

use alloy::primitives::{Address, TxHash};

use crate::{
    constants::{BASE_URI, CONTRACT_URI, TOKEN_IDS},
    errors::ScriptError,
};

/// The prebuilt contract templates that can be deployed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Template {
    /// An ERC721 contract in which only the owner mints
    Erc721Mintable,
    /// An ERC721 contract in which users mint for a price
    Erc721UserMintable,
    /// An ERC1155 contract in which only the owner mints
    Erc1155Mintable,
}

impl Template {
    /// Every deployable template
    pub const ALL: [Template; 3] = [
        Template::Erc721Mintable,
        Template::Erc721UserMintable,
        Template::Erc1155Mintable,
    ];

    /// The Solidity types of the template's constructor parameters, in order
    pub fn constructor_types(&self) -> &'static [&'static str] {
        match self {
            Template::Erc721Mintable => &["string", "string", "string"],
            Template::Erc721UserMintable => &[
                "string", "string", "string", "string", "uint256", "uint256", "uint256",
            ],
            Template::Erc1155Mintable => &["string", "string", "uint256[]"],
        }
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Erc721Mintable => write!(f, "ERC721Mintable"),
            Template::Erc721UserMintable => write!(f, "ERC721UserMintable"),
            Template::Erc1155Mintable => write!(f, "ERC1155Mintable"),
        }
    }
}

/// Parameters of the [`Template::Erc721Mintable`] template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721MintableParams {
    /// The token collection name
    pub name: String,
    /// The token collection symbol
    pub symbol: String,
    /// The contract-level metadata URI
    pub contract_uri: String,
}

/// Parameters of the [`Template::Erc721UserMintable`] template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721UserMintableParams {
    /// The token collection name
    pub name: String,
    /// The token collection symbol
    pub symbol: String,
    /// The base token metadata URI
    pub base_uri: String,
    /// The contract-level metadata URI
    pub contract_uri: String,
    /// The maximum number of tokens that can ever be minted
    pub max_supply: u64,
    /// The mint price of a single token, as a decimal amount of ether
    pub price: String,
    /// The maximum number of tokens a single mint may request
    pub max_token_request: u64,
}

/// Parameters of the [`Template::Erc1155Mintable`] template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc1155MintableParams {
    /// The base token metadata URI
    pub base_uri: String,
    /// The contract-level metadata URI
    pub contract_uri: String,
    /// The token IDs registered at construction
    pub ids: Vec<u64>,
}

/// The parameter bundle of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateParams {
    /// Parameters of an ERC721 mintable contract
    Erc721Mintable(Erc721MintableParams),
    /// Parameters of an ERC721 user-mintable contract
    Erc721UserMintable(Erc721UserMintableParams),
    /// Parameters of an ERC1155 mintable contract
    Erc1155Mintable(Erc1155MintableParams),
}

impl TemplateParams {
    /// The template these parameters are shaped for
    pub fn template(&self) -> Template {
        match self {
            TemplateParams::Erc721Mintable(_) => Template::Erc721Mintable,
            TemplateParams::Erc721UserMintable(_) => Template::Erc721UserMintable,
            TemplateParams::Erc1155Mintable(_) => Template::Erc1155Mintable,
        }
    }
}

/// A request to deploy one instance of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// The template to deploy
    pub template: Template,
    /// The constructor parameters
    pub params: TemplateParams,
}

impl DeployRequest {
    /// The mintable multi-token deployment performed by the script
    pub fn mintable_multi_token() -> Self {
        Self {
            template: Template::Erc1155Mintable,
            params: TemplateParams::Erc1155Mintable(Erc1155MintableParams {
                base_uri: BASE_URI.to_string(),
                contract_uri: CONTRACT_URI.to_string(),
                ids: TOKEN_IDS.to_vec(),
            }),
        }
    }

    /// Checks that the parameters fit the selected template
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.params.template() != self.template {
            return Err(ScriptError::InvalidParams(format!(
                "{} params supplied for template {}",
                self.params.template(),
                self.template
            )));
        }

        match &self.params {
            TemplateParams::Erc721Mintable(p) => {
                require_non_empty("name", &p.name)?;
                require_non_empty("symbol", &p.symbol)?;
                require_non_empty("contractURI", &p.contract_uri)
            }
            TemplateParams::Erc721UserMintable(p) => {
                require_non_empty("name", &p.name)?;
                require_non_empty("symbol", &p.symbol)?;
                require_non_empty("baseURI", &p.base_uri)?;
                require_non_empty("contractURI", &p.contract_uri)?;
                require_non_empty("price", &p.price)?;
                if p.max_supply == 0 {
                    return Err(ScriptError::InvalidParams(
                        "maxSupply must be positive".to_string(),
                    ));
                }
                if p.max_token_request == 0 || p.max_token_request > p.max_supply {
                    return Err(ScriptError::InvalidParams(
                        "maxTokenRequest must be between 1 and maxSupply".to_string(),
                    ));
                }
                Ok(())
            }
            TemplateParams::Erc1155Mintable(p) => {
                require_non_empty("baseURI", &p.base_uri)?;
                require_non_empty("contractURI", &p.contract_uri)?;
                if p.ids.is_empty() {
                    return Err(ScriptError::InvalidParams("ids must not be empty".to_string()));
                }
                Ok(())
            }
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ScriptError> {
    if value.trim().is_empty() {
        Err(ScriptError::InvalidParams(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// A successfully deployed template instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The template that was deployed
    pub template: Template,
    /// The address of the new contract
    pub contract_address: Address,
    /// The hash of the creation transaction
    pub transaction_hash: TxHash,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mintable_multi_token_is_fixed() {
        let request = DeployRequest::mintable_multi_token();
        assert_eq!(request.template, Template::Erc1155Mintable);
        assert_eq!(request.template.to_string(), "ERC1155Mintable");

        let TemplateParams::Erc1155Mintable(params) = &request.params else {
            panic!("expected ERC1155 params");
        };
        assert_eq!(params.base_uri, BASE_URI);
        assert_eq!(params.contract_uri, CONTRACT_URI);
        assert_eq!(params.ids, vec![0, 1]);

        assert_eq!(request, DeployRequest::mintable_multi_token());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_mismatched_params_rejected() {
        let request = DeployRequest {
            template: Template::Erc721Mintable,
            params: DeployRequest::mintable_multi_token().params,
        };

        assert!(matches!(
            request.validate(),
            Err(ScriptError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_empty_ids_rejected() {
        let mut request = DeployRequest::mintable_multi_token();
        if let TemplateParams::Erc1155Mintable(params) = &mut request.params {
            params.ids.clear();
        }

        assert_eq!(
            request.validate(),
            Err(ScriptError::InvalidParams("ids must not be empty".to_string()))
        );
    }

    #[test]
    fn test_user_mintable_bounds() {
        let mut params = Erc721UserMintableParams {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            base_uri: "ipfs://base/".to_string(),
            contract_uri: "ipfs://contract".to_string(),
            max_supply: 10,
            price: "0.01".to_string(),
            max_token_request: 2,
        };
        let request = |p: &Erc721UserMintableParams| DeployRequest {
            template: Template::Erc721UserMintable,
            params: TemplateParams::Erc721UserMintable(p.clone()),
        };
        assert!(request(&params).validate().is_ok());

        params.max_token_request = 11;
        assert!(request(&params).validate().is_err());

        params.max_token_request = 2;
        params.symbol = "  ".to_string();
        assert!(request(&params).validate().is_err());
    }
}
