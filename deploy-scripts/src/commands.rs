//! The deployment command: one deploy call, one reported outcome

use std::path::Path;

use tracing::{error, info, warn};

use crate::{
    errors::ScriptError,
    sdk::Deployer,
    types::{DeployRequest, DeployedContract},
    utils::write_deployment,
};

/// The settled result of a deployment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    /// The contract was deployed
    Deployed(DeployedContract),
    /// The deploy call failed
    Failed(ScriptError),
}

impl DeploymentOutcome {
    /// The line reported for this outcome
    pub fn log_line(&self) -> String {
        match self {
            DeploymentOutcome::Deployed(contract) => {
                format!("Contract: {}", contract.contract_address)
            }
            DeploymentOutcome::Failed(e) => e.to_string(),
        }
    }

    /// Emit the outcome's log line, returning it
    pub fn report(&self) -> String {
        let line = self.log_line();
        match self {
            DeploymentOutcome::Deployed(_) => info!("{}", line),
            DeploymentOutcome::Failed(_) => error!("{}", line),
        }

        line
    }
}

/// Issue exactly one deploy call and settle it into an outcome.
///
/// Deployment errors are captured in the outcome, never propagated.
pub async fn run_deployment(
    deployer: &impl Deployer,
    request: DeployRequest,
) -> DeploymentOutcome {
    match deployer.deploy(request).await {
        Ok(contract) => DeploymentOutcome::Deployed(contract),
        Err(e) => DeploymentOutcome::Failed(e),
    }
}

/// Deploy the request, report the outcome, and record the deployed address
/// in the deployments file if one is given
pub async fn deploy(
    deployer: &impl Deployer,
    request: DeployRequest,
    deployments_path: Option<&Path>,
) -> DeploymentOutcome {
    let outcome = run_deployment(deployer, request).await;
    outcome.report();

    if let (DeploymentOutcome::Deployed(contract), Some(path)) = (&outcome, deployments_path) {
        let key = contract.template.to_string();
        if let Err(e) = write_deployment(path, &key, contract.contract_address) {
            warn!("Deployed address not recorded: {}", e);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use alloy::primitives::{address, TxHash};

    use super::*;
    use crate::{types::Template, utils::read_deployment};

    /// A deployer that records each request and settles with a fixed result
    struct MockDeployer {
        result: Result<DeployedContract, ScriptError>,
        requests: Mutex<Vec<DeployRequest>>,
    }

    impl MockDeployer {
        fn new(result: Result<DeployedContract, ScriptError>) -> Self {
            Self {
                result,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<DeployRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Deployer for MockDeployer {
        async fn deploy(&self, request: DeployRequest) -> Result<DeployedContract, ScriptError> {
            self.requests.lock().unwrap().push(request);
            self.result.clone()
        }
    }

    /// A log sink shared between the test and the subscriber writing to it
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(|l| l.trim().to_string())
                .collect()
        }
    }

    /// Report the outcome under a subscriber capturing bare log messages
    fn capture_report(outcome: &DeploymentOutcome) -> (String, Vec<String>) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_target(false)
            .finish();

        let line = tracing::subscriber::with_default(subscriber, || outcome.report());
        (line, logs.lines())
    }

    fn deployed() -> DeployedContract {
        DeployedContract {
            template: Template::Erc1155Mintable,
            contract_address: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            transaction_hash: TxHash::ZERO,
        }
    }

    #[tokio::test]
    async fn test_success_logs_address() {
        let deployer = MockDeployer::new(Ok(deployed()));
        let outcome = run_deployment(&deployer, DeployRequest::mintable_multi_token()).await;

        assert_eq!(outcome, DeploymentOutcome::Deployed(deployed()));
        assert_eq!(
            outcome.log_line(),
            "Contract: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[tokio::test]
    async fn test_failure_logs_error() {
        let err = ScriptError::ContractDeployment("insufficient funds".to_string());
        let deployer = MockDeployer::new(Err(err.clone()));
        let outcome = run_deployment(&deployer, DeployRequest::mintable_multi_token()).await;

        assert_eq!(outcome, DeploymentOutcome::Failed(err.clone()));
        assert_eq!(outcome.log_line(), err.to_string());
        assert!(!outcome.log_line().starts_with("Contract:"));
    }

    #[test]
    fn test_report_emits_single_line() {
        let (line, logs) = capture_report(&DeploymentOutcome::Deployed(deployed()));
        assert_eq!(line, "Contract: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(logs, vec![line]);

        let err = ScriptError::ContractDeployment("insufficient funds".to_string());
        let (line, logs) = capture_report(&DeploymentOutcome::Failed(err.clone()));
        assert_eq!(line, err.to_string());
        assert_eq!(logs, vec![line]);
        assert!(!logs[0].contains("Contract:"));
    }

    #[tokio::test]
    async fn test_single_call_with_fixed_request() {
        for result in [
            Ok(deployed()),
            Err(ScriptError::ClientInitialization("connection refused".to_string())),
        ] {
            let deployer = MockDeployer::new(result);
            deploy(&deployer, DeployRequest::mintable_multi_token(), None).await;

            assert_eq!(
                deployer.requests(),
                vec![DeployRequest::mintable_multi_token()]
            );
        }
    }

    #[tokio::test]
    async fn test_records_deployment() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("deployments.json");

        let deployer = MockDeployer::new(Ok(deployed()));
        deploy(&deployer, DeployRequest::mintable_multi_token(), Some(&path)).await;

        assert_eq!(
            read_deployment(&path, "ERC1155Mintable")?,
            deployed().contract_address
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        let deployer = MockDeployer::new(Err(ScriptError::ContractDeployment(
            "reverted".to_string(),
        )));
        deploy(&deployer, DeployRequest::mintable_multi_token(), Some(&path)).await;

        assert!(!path.exists());
    }
}
