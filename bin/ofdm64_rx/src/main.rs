mod error;
mod observer;

use clap::Parser;
use error::CliError;
use num::complex::Complex32;
use observer::LoggingObserver;
use ofdm64_sync::{ConsumerAction, FrameSynchronizer, IngestOutcome, SynchronizerSettings};
use std::io::{BufWriter, Read, Write};

/// Streams raw interleaved `i16` I/Q samples through an [`ofdm64_sync::FrameSynchronizer`]
/// and writes the demodulated data subcarriers out as interleaved `f32` I/Q.
///
/// This binary is a thin ambient-stack wrapper around the core: argument parsing,
/// file/stdin/stdout plumbing, and structured logging. It carries none of the
/// synchronization logic itself.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppArguments {
    /// Number of complex samples to read per chunk from the input.
    #[arg(short, long, default_value_t = 4096)]
    number_of_input_samples: usize,
    /// Input filepath of raw interleaved i16 I/Q samples. Reads stdin if omitted.
    #[arg(short, long)]
    input_filepath: Option<String>,
    /// Output filepath for demodulated data subcarriers as interleaved f32 I/Q.
    /// Writes stdout if omitted.
    #[arg(short, long)]
    output_filepath: Option<String>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = AppArguments::parse();
    run(args)
}

fn run(args: AppArguments) -> Result<(), CliError> {
    if args.number_of_input_samples == 0 {
        return Err(CliError::ZeroChunkSize);
    }

    let mut input: Box<dyn Read> = match &args.input_filepath {
        None => Box::new(std::io::stdin()),
        Some(path) => Box::new(std::fs::File::open(path).map_err(|source| CliError::OpenInput {
            path: path.clone(),
            source,
        })?),
    };
    let mut output: Box<dyn Write> = match &args.output_filepath {
        None => Box::new(BufWriter::new(std::io::stdout())),
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path).map_err(
            |source| CliError::CreateOutput {
                path: path.clone(),
                source,
            },
        )?)),
    };

    const BYTES_PER_SAMPLE: usize = 4; // i16 I + i16 Q
    const I16_FULL_SCALE: f32 = 32768.0;

    let mut raw_bytes = vec![0u8; args.number_of_input_samples * BYTES_PER_SAMPLE];
    let mut samples = vec![Complex32::default(); args.number_of_input_samples];

    let mut sync = FrameSynchronizer::with_observer(
        SynchronizerSettings::default(),
        |data: &[Complex32; 48]| -> ConsumerAction {
            for v in data.iter() {
                if let Err(err) = output.write_all(&v.re.to_le_bytes()) {
                    tracing::error!(%err, "failed to write in-phase sample");
                    return ConsumerAction::Stop;
                }
                if let Err(err) = output.write_all(&v.im.to_le_bytes()) {
                    tracing::error!(%err, "failed to write quadrature sample");
                    return ConsumerAction::Stop;
                }
            }
            ConsumerAction::Continue
        },
        LoggingObserver::default(),
    );

    loop {
        let bytes_read = read_up_to(&mut input, &mut raw_bytes).map_err(CliError::Read)?;
        if bytes_read == 0 {
            break;
        }
        let total_samples = bytes_read / BYTES_PER_SAMPLE;
        for (i, chunk) in raw_bytes[..total_samples * BYTES_PER_SAMPLE]
            .chunks_exact(BYTES_PER_SAMPLE)
            .enumerate()
        {
            let re = i16::from_le_bytes([chunk[0], chunk[1]]) as f32 / I16_FULL_SCALE;
            let im = i16::from_le_bytes([chunk[2], chunk[3]]) as f32 / I16_FULL_SCALE;
            samples[i] = Complex32::new(re, im);
        }

        if let IngestOutcome::Stopped = sync.process(&samples[..total_samples]) {
            tracing::info!("consumer requested stop, halting ingestion");
            break;
        }
    }

    drop(sync);
    output.flush().map_err(CliError::Write)?;
    Ok(())
}

/// Fills `buf` from `reader`, stopping early at EOF. Returns the number of bytes read.
fn read_up_to(reader: &mut dyn Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..])? {
            0 => break,
            n => total += n,
        }
    }
    Ok(total)
}
