pub mod error;
pub mod preamble;
pub mod subcarrier;

pub use error::PreambleError;
pub use preamble::{derive_lt_ref, PreambleReferences, LF_REF};
pub use subcarrier::{
    data_indices, subcarrier_type, SubcarrierType, NUM_DATA_SUBCARRIERS, NUM_SUBCARRIERS,
    PILOT_FREQUENCIES, PILOT_INDICES,
};
