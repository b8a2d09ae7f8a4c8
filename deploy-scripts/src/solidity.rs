//! ABI encoding of the template constructor arguments

use alloy::{
    primitives::{utils::parse_ether, U256},
    sol_types::SolValue,
};

use crate::{errors::ScriptError, types::TemplateParams};

/// ABI-encode the constructor arguments for the given parameter bundle,
/// ready to be appended to the template's creation bytecode
pub fn constructor_calldata(params: &TemplateParams) -> Result<Vec<u8>, ScriptError> {
    let calldata = match params {
        TemplateParams::Erc721Mintable(p) => (
            p.name.clone(),
            p.symbol.clone(),
            p.contract_uri.clone(),
        )
            .abi_encode_params(),
        TemplateParams::Erc721UserMintable(p) => {
            let price_wei = parse_ether(&p.price)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

            (
                p.name.clone(),
                p.symbol.clone(),
                p.base_uri.clone(),
                p.contract_uri.clone(),
                U256::from(p.max_supply),
                price_wei,
                U256::from(p.max_token_request),
            )
                .abi_encode_params()
        }
        TemplateParams::Erc1155Mintable(p) => (
            p.base_uri.clone(),
            p.contract_uri.clone(),
            p.ids.iter().copied().map(U256::from).collect::<Vec<_>>(),
        )
            .abi_encode_params(),
    };

    Ok(calldata)
}
