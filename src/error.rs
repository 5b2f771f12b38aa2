use thiserror::Error;

/// Everything that can stop a check before the pool is fully evaluated.
///
/// Each variant is terminal for the invocation: the caller reports it as
/// UNKNOWN (exit 3) and ends. WARNING/CRITICAL are reserved for pools that
/// were evaluated successfully.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A capacity threshold was given outside the percent range.
    #[error("warning and critical thresholds must be between 0 and 100")]
    ArgumentRange,

    /// The external zpool command could not be launched or exited non-zero
    /// (not installed, or sudo denied). Distinct from parse problems.
    #[error("unable to run `{command}`: {reason}")]
    PrivilegeOrInvocation { command: String, reason: String },

    /// The requested pool does not appear in the all-pools listing.
    #[error("Pool {0} is invalid. Please select a valid pool.")]
    PoolNotFound(String),

    /// The listing header lacks a column we cannot check without.
    #[error("column {0} missing from zpool listing")]
    MissingRequiredField(&'static str),

    /// No usable CAP column — capacity perfdata is always reported, so the
    /// check cannot proceed without it.
    #[error("capacity column missing from zpool listing")]
    MissingCapacityField,

    /// A SIZE/ALLOC/FREE value was not `<number><K|M|G|T>`.
    #[error("malformed size value: {0}")]
    MalformedSizeValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_not_found_diagnostic_text() {
        let err = CheckError::PoolNotFound("tank".to_string());
        assert_eq!(
            err.to_string(),
            "Pool tank is invalid. Please select a valid pool."
        );
    }
}
