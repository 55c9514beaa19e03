pub mod consumer;
pub mod error;
pub mod observer;
pub mod settings;
pub mod state;
pub mod synchronizer;

pub use consumer::{ConsumerAction, IngestOutcome};
pub use error::SynchronizerError;
pub use observer::{NullObserver, Observer};
pub use settings::SynchronizerSettings;
pub use state::SyncState;
pub use synchronizer::FrameSynchronizer;
