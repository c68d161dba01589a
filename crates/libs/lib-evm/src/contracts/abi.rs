//! Solidity interfaces of the deployer and policy contracts.
//!
//! Each function declared here becomes a `<name>Call` type implementing
//! [`alloy_sol_types::SolCall`]; [`super::Contract`] accepts only the call
//! types registered for its interface marker.

use alloy_sol_types::sol;

use super::{ContractInterface, InterfaceFunction};

sol! {
    #![sol(all_derives)]

    /// Factory deploying one policy contract per wind farm.
    interface IWindFarmPolicyDeployer {
        function newWindFarm(
            address link,
            address oracle,
            uint256 amount,
            address client,
            uint256 duration,
            string latitude,
            string longitude
        ) external payable;

        function getDeployedPolicies() external view returns (address[] policies);

        function updateStateOfAllContracts() external;
    }

    /// Per-farm parametric policy.
    interface IInsureWindFarm {
        function payPremium() external payable;

        /// Tenths of km/h.
        function getLatestWindSpeed() external view returns (uint256 speed);

        function updateState() external;
    }
}

/// Marker for [`IWindFarmPolicyDeployer`].
#[derive(Debug, Clone, Copy)]
pub struct Deployer;

impl ContractInterface for Deployer {
    const NAME: &'static str = "IWindFarmPolicyDeployer";
}

impl InterfaceFunction<Deployer> for IWindFarmPolicyDeployer::newWindFarmCall {}
impl InterfaceFunction<Deployer> for IWindFarmPolicyDeployer::getDeployedPoliciesCall {}
impl InterfaceFunction<Deployer> for IWindFarmPolicyDeployer::updateStateOfAllContractsCall {}

/// Marker for [`IInsureWindFarm`].
#[derive(Debug, Clone, Copy)]
pub struct Policy;

impl ContractInterface for Policy {
    const NAME: &'static str = "IInsureWindFarm";
}

impl InterfaceFunction<Policy> for IInsureWindFarm::payPremiumCall {}
impl InterfaceFunction<Policy> for IInsureWindFarm::getLatestWindSpeedCall {}
impl InterfaceFunction<Policy> for IInsureWindFarm::updateStateCall {}
