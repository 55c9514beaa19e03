pub mod agc;
pub mod autocorrelator;
pub mod circular_bucket;
pub mod crosscorrelator;
pub mod fft;
pub mod linear_bucket;
pub mod nco;
pub mod pn_sequence;
pub mod polyfit;

pub use agc::Agc;
pub use autocorrelator::AutoCorrelator;
pub use circular_bucket::CircularBucket;
pub use crosscorrelator::CrossCorrelator;
pub use fft::{ForwardFft, RustFftForward};
pub use linear_bucket::LinearBucket;
pub use nco::Nco;
pub use pn_sequence::PnSequence;
pub use polyfit::{polyfit, polyval};
