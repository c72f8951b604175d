//! Line-oriented (NDJSON) batch decoding.

use std::io::{self, BufRead};

use dmp_decode::{DecodeError, DecodeStats, Decoder};
use dmp_model::DecodedRecord;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read input line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("failed to write output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Abort on the first malformed record instead of skipping it.
    pub fail_fast: bool,
}

/// A line that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub stats: DecodeStats,
    pub skipped: Vec<SkippedLine>,
}

/// Decode every non-blank line of `input`, handing each decoded record to
/// `sink`. Line numbers are 1-based.
pub fn decode_lines<R, F>(
    decoder: &Decoder,
    input: R,
    options: BatchOptions,
    mut sink: F,
) -> Result<BatchReport, BatchError>
where
    R: BufRead,
    F: FnMut(&DecodedRecord) -> io::Result<()>,
{
    let span = info_span!("decode_batch", fail_fast = options.fail_fast);
    let _guard = span.enter();
    let mut report = BatchReport::default();

    for (idx, line) in input.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|source| BatchError::Read {
            line: line_number,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match dmp_decode::parse_record(&line) {
            Ok(record) => record,
            Err(source) if options.fail_fast => {
                return Err(BatchError::Record {
                    line: line_number,
                    source,
                });
            }
            Err(error) => {
                warn!(line = line_number, %error, "skipping malformed record");
                report.skipped.push(SkippedLine {
                    line: line_number,
                    reason: error.to_string(),
                });
                continue;
            }
        };

        let (decoded, stats) = decoder.decode_with_stats(&record);
        debug!(
            line = line_number,
            subject_id = %decoded.subject_id,
            decoded = stats.decoded,
            dropped = stats.dropped(),
            "record decoded"
        );
        report.stats += stats;
        sink(&decoded).map_err(|source| BatchError::Write { source })?;
    }

    info!(
        records = report.stats.records,
        decoded = report.stats.decoded,
        dropped = report.stats.dropped(),
        skipped = report.skipped.len(),
        "batch decoded"
    );
    Ok(report)
}
