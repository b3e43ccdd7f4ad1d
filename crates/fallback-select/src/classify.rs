//! Failure Classification

/// Extension trait mapping a live error value to its failure-kind name.
///
/// The returned name is resolved against the host's failure taxonomy to
/// recover the full ancestry chain, so rules that include a supertype also
/// cover errors reporting one of its subtypes.
pub trait FailureClass: std::error::Error {
    /// Failure-kind name for this error value
    fn failure_kind(&self) -> &str;
}
