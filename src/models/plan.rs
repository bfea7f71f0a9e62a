//! Kubernetes network plan request and result types.

use super::{DeploymentTier, Ipv4};
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plan format version stamped into every plan.
pub const PLAN_VERSION: &str = "1.0";

/// Cloud provider naming policy. Never contacts the provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Eks,
    Gke,
    Aks,
    #[default]
    Kubernetes,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Eks,
        Provider::Gke,
        Provider::Aks,
        Provider::Kubernetes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Eks => "eks",
            Provider::Gke => "gke",
            Provider::Aks => "aks",
            Provider::Kubernetes => "kubernetes",
        }
    }
}

impl FromStr for Provider {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eks" => Ok(Provider::Eks),
            "gke" => Ok(Provider::Gke),
            "aks" => Ok(Provider::Aks),
            "kubernetes" | "k8s" => Ok(Provider::Kubernetes),
            _ => Err(PlanError::InvalidProvider(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller input for plan generation. Fields stay strings so that
/// validation errors carry the offending value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub deployment_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
}

impl PlanRequest {
    pub fn new(deployment_size: &str) -> PlanRequest {
        PlanRequest {
            deployment_size: deployment_size.to_string(),
            ..Default::default()
        }
    }

    pub fn provider(mut self, provider: &str) -> PlanRequest {
        self.provider = Some(provider.to_string());
        self
    }

    pub fn vpc_cidr(mut self, cidr: &str) -> PlanRequest {
        self.vpc_cidr = Some(cidr.to_string());
        self
    }

    pub fn deployment_name(mut self, name: &str) -> PlanRequest {
        self.deployment_name = Some(name.to_string());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubnetType {
    Public,
    Private,
}

impl SubnetType {
    pub fn name(&self) -> &'static str {
        match self {
            SubnetType::Public => "public",
            SubnetType::Private => "private",
        }
    }
}

/// One allocated VPC subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSubnet {
    pub cidr: Ipv4,
    pub name: String,
    #[serde(rename = "type")]
    pub subnet_type: SubnetType,
    pub availability_zone: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrBlock {
    pub cidr: Ipv4,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanSubnets {
    pub public: Vec<PlannedSubnet>,
    pub private: Vec<PlannedSubnet>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub generated_at: String,
    pub version: String,
}

/// Generated network plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPlan {
    pub deployment_size: DeploymentTier,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    pub vpc: CidrBlock,
    pub subnets: PlanSubnets,
    pub pods: CidrBlock,
    pub services: CidrBlock,
    pub metadata: PlanMetadata,
}

impl NetworkPlan {
    /// Every allocation in the plan with a label, VPC first.
    pub fn all_cidrs(&self) -> Vec<(String, Ipv4)> {
        let mut cidrs = vec![("vpc".to_string(), self.vpc.cidr)];
        cidrs.extend(
            self.subnets
                .public
                .iter()
                .chain(self.subnets.private.iter())
                .map(|s| (s.name.clone(), s.cidr)),
        );
        cidrs.push(("pods".to_string(), self.pods.cidr));
        cidrs.push(("services".to_string(), self.services.cidr));
        cidrs
    }

    /// Re-check the plan invariants: subnets inside the VPC, nothing else
    /// overlapping.
    pub fn validate(&self) -> Result<(), PlanError> {
        use itertools::Itertools;

        let vpc = self.vpc.cidr;
        for subnet in self.subnets.public.iter().chain(self.subnets.private.iter()) {
            if !vpc.contains_net(&subnet.cidr) {
                return Err(PlanError::SubnetAllocationOverflow {
                    vpc: vpc.to_string(),
                    name: subnet.name.clone(),
                    prefix: subnet.cidr.prefix,
                });
            }
        }

        let cidrs = self.all_cidrs();
        for ((first_name, first), (second_name, second)) in cidrs.iter().tuple_combinations() {
            let subnet_in_vpc = first_name == "vpc"
                && second_name != "pods"
                && second_name != "services";
            if !subnet_in_vpc && first.overlaps(second) {
                return Err(PlanError::OverlapDetected {
                    first: format!("{first_name} {first}"),
                    second: format!("{second_name} {second}"),
                });
            }
        }
        Ok(())
    }
}
