/// The action a consumer requests after receiving one demodulated payload symbol.
///
/// Replaces the source's magic integer callback return codes (`0`, `1`, `-1`) with a
/// tagged enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerAction {
    /// Keep collecting payload symbols in the current frame.
    Continue,
    /// Restart acquisition from `SeekShort`.
    Reset,
    /// Stop ingestion; the synchronizer itself is left intact for the caller to drop.
    Stop,
}

/// The outcome of a call to [`crate::FrameSynchronizer::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Every sample in the batch was processed; the caller may feed more.
    Continued,
    /// The consumer returned [`ConsumerAction::Stop`]; `process` returned before
    /// consuming the whole batch.
    Stopped,
}
