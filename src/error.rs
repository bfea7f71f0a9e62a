//! Error types for the CIDR engine and the network plan generator.
//!
//! Every error carries a stable machine-readable [`code`](CidrError::code) so
//! callers can map failures to responses without parsing message text.

use thiserror::Error;

/// Errors raised by the CIDR engine (address parsing, masks, splitting).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Address is not four base-10 octets in 0..=255.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// Prefix length outside 0..=32, or a non-contiguous mask.
    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    /// CIDR string is not `address/prefix`.
    #[error("invalid CIDR format: {0} (expected a.b.c.d/prefix)")]
    InvalidCidrFormat(String),

    /// A /32 holds a single address and has no halves.
    #[error("cannot split {0}: a /32 subnet holds a single address")]
    CannotSplit(String),

    /// Caller-supplied tree size already reached the node budget.
    #[error("subnet tree size limit exceeded: {current} nodes (limit {limit})")]
    TreeSizeLimitExceeded { current: usize, limit: usize },
}

impl CidrError {
    /// Stable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CidrError::InvalidAddress(_) => "INVALID_ADDRESS",
            CidrError::InvalidPrefix(_) => "INVALID_PREFIX",
            CidrError::InvalidCidrFormat(_) => "INVALID_CIDR",
            CidrError::CannotSplit(_) => "CANNOT_SPLIT",
            CidrError::TreeSizeLimitExceeded { .. } => "TREE_SIZE_LIMIT_EXCEEDED",
        }
    }

    /// HTTP-style status hint. Engine errors always stem from caller input.
    pub fn status(&self) -> u16 {
        400
    }
}

/// Errors raised while generating a Kubernetes network plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid deployment size '{0}': expected one of micro, standard, professional, enterprise, hyperscale")]
    InvalidDeploymentSize(String),

    #[error("invalid provider '{0}': expected one of eks, gke, aks, kubernetes, k8s")]
    InvalidProvider(String),

    #[error("unknown deployment tier '{0}'")]
    UnknownTier(String),

    #[error("invalid VPC CIDR: {0}")]
    InvalidVpcCidr(#[from] CidrError),

    /// Message wording is surfaced verbatim to API users.
    #[error("VPC CIDR {0} is not in RFC 1918 private address space. For security reasons only private ranges are allowed: 10.0.0.0/8, 172.16.0.0/12 or 192.168.0.0/16")]
    PublicCidrRejected(String),

    #[error("VPC CIDR {cidr} is too small for the {tier} tier: prefix /{prefix} exceeds the minimum /{min_prefix}")]
    InsufficientVpcSpace {
        cidr: String,
        tier: String,
        prefix: u8,
        min_prefix: u8,
    },

    #[error("subnet {name} (/{prefix}) does not fit inside VPC {vpc}")]
    SubnetAllocationOverflow {
        vpc: String,
        name: String,
        prefix: u8,
    },

    #[error("no RFC 1918 block has room for a /{prefix} {purpose} range")]
    AddressSpaceExhausted { purpose: String, prefix: u8 },

    #[error("network plan ranges overlap: {first} and {second}")]
    OverlapDetected { first: String, second: String },
}

impl PlanError {
    /// Stable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::InvalidDeploymentSize(_)
            | PlanError::InvalidProvider(_)
            | PlanError::UnknownTier(_) => "INVALID_REQUEST",
            _ => "NETWORK_GENERATION_ERROR",
        }
    }

    /// HTTP-style status hint: 500 only for failures that are not the caller's input.
    pub fn status(&self) -> u16 {
        match self {
            PlanError::AddressSpaceExhausted { .. } | PlanError::OverlapDetected { .. } => 500,
            _ => 400,
        }
    }
}

pub type CidrResult<T> = Result<T, CidrError>;
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_error_codes() {
        assert_eq!(
            CidrError::InvalidAddress("x".to_string()).code(),
            "INVALID_ADDRESS"
        );
        assert_eq!(
            CidrError::TreeSizeLimitExceeded {
                current: 10000,
                limit: 10000
            }
            .code(),
            "TREE_SIZE_LIMIT_EXCEEDED"
        );
        assert_eq!(CidrError::CannotSplit("1.1.1.1/32".into()).status(), 400);
    }

    #[test]
    fn test_plan_error_codes() {
        assert_eq!(
            PlanError::InvalidProvider("aws".into()).code(),
            "INVALID_REQUEST"
        );
        assert_eq!(
            PlanError::PublicCidrRejected("8.8.8.0/24".into()).code(),
            "NETWORK_GENERATION_ERROR"
        );
        let wrapped: PlanError = CidrError::InvalidPrefix("33".into()).into();
        assert_eq!(wrapped.code(), "NETWORK_GENERATION_ERROR");
        assert_eq!(wrapped.status(), 400);
        assert_eq!(
            PlanError::AddressSpaceExhausted {
                purpose: "pods".into(),
                prefix: 8
            }
            .status(),
            500
        );
    }

    #[test]
    fn test_public_cidr_message() {
        let msg = PlanError::PublicCidrRejected("8.8.8.0/24".into()).to_string();
        assert!(msg.contains("RFC 1918"));
        assert!(msg.contains("private"));
        assert!(msg.contains("security"));
    }
}
