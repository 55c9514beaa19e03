/// Number of subcarriers in the fixed 64-point OFDM transform this system is built around.
pub const NUM_SUBCARRIERS: usize = 64;
/// Number of subcarriers classified as DATA (the remainder after NULL and PILOT).
pub const NUM_DATA_SUBCARRIERS: usize = 48;

/// Raw FFT bin indices carrying pilot tones.
pub const PILOT_INDICES: [usize; 4] = [11, 25, 39, 53];
/// Nominal (centered, DC-at-32) frequency axis positions used for the pilot phase fit,
/// in the same order as [`PILOT_INDICES`]. These are logical positions for the linear
/// fit in `ofdm64_sync`'s phase tracker, not the raw FFT bin frequencies.
pub const PILOT_FREQUENCIES: [f32; 4] = [-21.0, -7.0, 7.0, 21.0];

/// Classification of a subcarrier index into its role in the OFDM symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcarrierType {
    /// DC and guard-band subcarriers: index 0, or 27..=37.
    Null,
    /// One of the four known-phase pilot tones.
    Pilot,
    /// An information-bearing subcarrier.
    Data,
}

/// Classifies subcarrier `index` in `[0, NUM_SUBCARRIERS)`.
pub fn subcarrier_type(index: usize) -> SubcarrierType {
    assert!(index < NUM_SUBCARRIERS, "subcarrier index {} out of range", index);
    if index == 0 || (27..=37).contains(&index) {
        SubcarrierType::Null
    } else if PILOT_INDICES.contains(&index) {
        SubcarrierType::Pilot
    } else {
        SubcarrierType::Data
    }
}

/// Iterates the subcarrier indices classified as DATA, in ascending order.
pub fn data_indices() -> impl Iterator<Item = usize> {
    (0..NUM_SUBCARRIERS).filter(|&i| subcarrier_type(i) == SubcarrierType::Data)
}
