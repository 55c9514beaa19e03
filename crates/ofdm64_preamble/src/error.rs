use thiserror::Error;

/// Failure modes for constructing a [`crate::PreambleReferences`] from caller-supplied tables.
///
/// The compiled-in [`crate::PreambleReferences::standard`] path can never produce these;
/// they only arise from [`crate::PreambleReferences::from_tables`] being handed a
/// structurally invalid reference.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PreambleError {
    #[error("preamble reference table must not be all-zero")]
    DegenerateReference,
}
