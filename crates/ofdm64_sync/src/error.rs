/// Failure modes for constructing a [`crate::FrameSynchronizer`] from caller-supplied
/// preamble tables.
///
/// The core's running state machine never produces a `Result`: the three recoverable
/// failure kinds it recognizes (no preamble, missing second PLCP long, consumer
/// requested restart) are all handled internally via `reset`, not surfaced as errors.
/// This type exists solely for the one fallible construction path, analogous to the
/// teacher crate's `assert!`-based parameter validation in `OfdmParameters::new`.
pub use ofdm64_preamble::PreambleError as SynchronizerError;
