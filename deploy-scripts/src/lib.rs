//! Scripts for deploying prebuilt NFT contract templates.

#![deny(missing_docs)]

pub mod artifacts;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod sdk;
mod solidity;
pub mod types;
pub mod utils;
