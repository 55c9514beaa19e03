/// The synchronizer's acquisition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Seeking the PLCP short training sequence via delay-correlation.
    SeekShort,
    /// First PLCP long training sequence: seeking via cross-correlation.
    SeekLong0,
    /// Second PLCP long training sequence: fine CFO and gain estimation.
    SeekLong1,
    /// Receiving and demodulating payload OFDM symbols.
    RxPayload,
}
