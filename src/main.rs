use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use idxview::{write_report, CountMode, DimsNotice, IdxBytes, ReportConfig, UNKNOWN_ELEMENT};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "idxview",
    version,
    about = "Print an IDX file's header and its first record as ASCII art"
)]
struct Args {
    /// IDX file to read (plain or compressed, e.g. train-images-idx3-ubyte.gz)
    #[clap(required = true)]
    path: PathBuf,

    /// Count complete records only, ignoring a trailing partial record
    #[clap(long)]
    full_records: bool,

    /// Printed in place of the element type name for unknown type codes
    #[clap(long, default_value = UNKNOWN_ELEMENT)]
    unknown_label: String,

    /// Show the declared dimension count in the clamping notice
    #[clap(long)]
    declared_dims: bool,
}
impl Args {
    fn config(&self) -> ReportConfig {
        ReportConfig {
            count_mode: if self.full_records {
                CountMode::Full
            } else {
                CountMode::Strides
            },
            unknown_label: self.unknown_label.clone(),
            dims_notice: if self.declared_dims {
                DimsNotice::Declared
            } else {
                DimsNotice::Clamped
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let bytes = IdxBytes::open(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    debug!(
        path = %args.path.display(),
        len = bytes.len(),
        mapped = bytes.is_mapped(),
        "loaded input"
    );

    let mut out = BufWriter::new(std::io::stdout().lock());
    let summary = write_report(&bytes, &args.config(), &mut out)
        .with_context(|| format!("Failed to render {}", args.path.display()));
    out.flush()?;
    let summary = summary?;

    info!(
        records = summary.record_count,
        items = summary.header.item_count,
        "done"
    );
    Ok(())
}
