//! Constants used in the deploy script

/// The environment variable holding the Infura project ID
pub const PROJECT_ID_ENV_VAR: &str = "INFURA_API_KEY";

/// The environment variable holding the Infura project secret
pub const SECRET_ID_ENV_VAR: &str = "INFURA_API_KEY_SECRET";

/// The environment variable holding the deployer's private key
pub const PRIV_KEY_ENV_VAR: &str = "WALLET_PRIVATE_KEY";

/// The chain deployed to when none is configured (Polygon Mumbai)
pub const DEFAULT_CHAIN_ID: u64 = 80001;

/// The directory searched for compiled template artifacts, and in which
/// freshly compiled ones are cached
pub const DEFAULT_ARTIFACTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/artifacts");

/// The Solidity sources of the templates and their shared dependencies, keyed
/// by the file name they are imported under
pub const TEMPLATE_SOURCES: [(&str, &str); 5] = [
    ("Common.sol", include_str!("../contracts/Common.sol")),
    ("ERC721Base.sol", include_str!("../contracts/ERC721Base.sol")),
    ("ERC721Mintable.sol", include_str!("../contracts/ERC721Mintable.sol")),
    ("ERC721UserMintable.sol", include_str!("../contracts/ERC721UserMintable.sol")),
    ("ERC1155Mintable.sol", include_str!("../contracts/ERC1155Mintable.sol")),
];

/// The name of the Solidity compiler command
pub const SOLC_COMMAND: &str = "solc";

/// The solc flag selecting JSON input and output over stdin / stdout
pub const SOLC_STANDARD_JSON_FLAG: &str = "--standard-json";

/// The optimizer runs setting used when compiling templates
pub const SOLC_OPTIMIZER_RUNS: u64 = 200;

/// The extension of a Solidity source file
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a compiled template artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The base token metadata URI of the deployed multi-token contract
pub const BASE_URI: &str =
    "https://ikzttp.mypinata.cloud/ipfs/QmeBWSnYPEnUimvpPfNHuvgcK9wFH9Sa6cZ4KDfgkfJJis/";

/// The contract-level metadata URI of the deployed multi-token contract
pub const CONTRACT_URI: &str = "https://azuki-prereveal.s3-us-west-1.amazonaws.com/metadata/";

/// The token IDs registered in the deployed multi-token contract
pub const TOKEN_IDS: [u64; 2] = [0, 1];

/// The host suffix of the Infura JSON-RPC endpoints
pub const INFURA_HOST_SUFFIX: &str = "infura.io";

/// The path prefix of the Infura JSON-RPC endpoints, followed by the project ID
pub const INFURA_API_VERSION: &str = "v3";

/// The Infura network subdomains, keyed by chain ID
pub const INFURA_NETWORKS: [(u64, &str); 8] = [
    (1, "mainnet"),
    (11155111, "sepolia"),
    (17000, "holesky"),
    (137, "polygon-mainnet"),
    (80001, "polygon-mumbai"),
    (80002, "polygon-amoy"),
    (59144, "linea-mainnet"),
    (59141, "linea-sepolia"),
];
