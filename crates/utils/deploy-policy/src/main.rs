//! # Deploy Policy Utility
//!
//! Creates a wind-farm policy from the preset parameters without the GUI,
//! then optionally exercises the new policy.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package deploy-policy --bin deploy_policy -- --update-state --pay-premium --read-wind-speed
//! ```
//!
//! The program will:
//! 1. Connect to the node configured by `RPC_URL`
//! 2. Select the node's first account as insurer and client
//! 3. Call `newWindFarm` and wait for confirmation
//! 4. Read the new policy address from the deployer
//! 5. Optionally update every policy's state (or only the new one's), pay
//!    one day's premium, and read the latest wind speed
//!
//! `--list` only prints the policies the deployer already knows about.

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use lib_core::Config;
use lib_evm::{DeployerContract, JsonRpcProvider, PolicySubmitter, WalletConnector, WalletProvider};
use tracing_subscriber::EnvFilter;

/// Create a wind-farm policy from the configured preset.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "deploy_policy", about = "Deploy a wind-farm policy and exercise it")]
struct Options {
    /// Call updateStateOfAllContracts on the deployer after deploying
    #[arg(long)]
    update_state: bool,

    /// Call updateState on the new policy only
    #[arg(long)]
    update_policy_state: bool,

    /// Pay one day's premium into the new policy
    #[arg(long)]
    pay_premium: bool,

    /// Read the latest oracle wind speed from the new policy
    #[arg(long)]
    read_wind_speed: bool,

    /// Only list the policies the deployer already knows about
    #[arg(
        long = "list",
        conflicts_with_all = ["update_state", "update_policy_state", "pay_premium", "read_wind_speed"]
    )]
    list_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deploy_policy=info,lib_evm=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let provider: Arc<dyn WalletProvider> = Arc::new(JsonRpcProvider::from_config(&config)?);

    if options.list_only {
        let deployer = DeployerContract::read_only(config.deployer_address, provider);
        let policies = deployer.deployed_policies().await?;
        println!("Deployer {} has {} policy(ies)", config.deployer_address, policies.len());
        for policy in policies {
            println!("  {}", policy);
        }
        return Ok(());
    }

    run_scenario(&config, provider, &options).await
}

async fn run_scenario(config: &Config, provider: Arc<dyn WalletProvider>, options: &Options) -> anyhow::Result<()> {
    let mut wallet = WalletConnector::new(provider);
    let account = wallet.connect().await.context("no account available on the node")?;
    println!("Using account {} on chain {:?}", account, wallet.chain_id());

    let params = config.policy_preset.clone();
    let submitter = PolicySubmitter::from_config(config);

    println!("Deploying client's wind farm policy contract...");
    let policy = match submitter.submit_new_policy(&wallet, &params).await {
        Ok(policy) => policy,
        Err(e) => bail!("{}", e.user_message()),
    };
    println!("New wind farm policy deployed to: {}", policy.address());
    println!("Deployment transaction: {}", policy.deployment_tx());
    println!("Insurance policy client: {}", account);

    if options.update_state {
        println!("Updating state on all policies...");
        let signer = wallet.signer().context("wallet disconnected")?;
        let deployer = DeployerContract::new(config.deployer_address, signer);
        let receipt = deployer
            .update_state_of_all_contracts()
            .await?
            .wait(submitter.confirmation())
            .await?;
        println!("State updated in block {:?}", receipt.block());
    }

    if options.update_policy_state {
        println!("Updating state on {}...", policy.address());
        let receipt = policy.update_state(submitter.confirmation()).await?;
        println!("Policy state updated in transaction {}", receipt.transaction_hash);
    }

    if options.pay_premium {
        println!("Paying today's premium of {} ETH...", params.daily_premium_eth());
        let receipt = policy
            .pay_premium(params.daily_premium(), submitter.confirmation())
            .await?;
        println!("Premium paid in transaction {}", receipt.transaction_hash);
    }

    if options.read_wind_speed {
        let tenths = policy.latest_wind_speed().await?;
        println!("Latest wind speed at the policy location: {:.1} km/h", tenths as f64 / 10.0);
    }

    Ok(())
}
