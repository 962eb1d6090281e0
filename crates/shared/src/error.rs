use thiserror::Error;

/// A response that does not honor the analysis service's wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("unrecognized sentiment label '{0}'")]
    UnknownLabel(String),
    #[error("page holds {returned} items but the limit is {limit}")]
    PageOverflow { returned: usize, limit: u32 },
    #[error("malformed response body: {0}")]
    Malformed(String),
}
