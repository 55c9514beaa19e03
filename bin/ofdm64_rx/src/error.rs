use thiserror::Error;

/// Ambient failure modes for the CLI demo. These sit entirely outside the
/// synchronizer core, which never returns a `Result` on the data path.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to open input file {path}: {source}")]
    OpenInput {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create output file {path}: {source}")]
    CreateOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error reading input samples: {0}")]
    Read(#[source] std::io::Error),
    #[error("error writing demodulated subcarriers: {0}")]
    Write(#[source] std::io::Error),
    #[error("number of input samples per chunk cannot be zero")]
    ZeroChunkSize,
}
