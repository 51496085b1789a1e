use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::RawRecord;

/// Per-run mapper counters, the observability side channel for the
/// silent-skip policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MapStats {
    pub lines_read: u64,
    pub records_emitted: u64,
    pub lines_filtered: u64,
    pub lines_malformed: u64,
}

/// The map stage: a stateless, single-pass text transformer. Each
/// well-formed record produces exactly three tab-separated emissions
/// (temperature, humidity, pressure); anything else produces nothing.
/// Metric values are echoed as the raw field text, never re-formatted.
pub struct Mapper;

impl Mapper {
    pub fn new() -> Self {
        Self
    }

    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<MapStats> {
        let mut stats = MapStats::default();

        for line in reader.lines() {
            let line = line?;
            stats.lines_read += 1;

            match RawRecord::parse(&line) {
                Ok(record) => {
                    // All three lines or none; parse has already vetted
                    // every field.
                    for (key, metric) in record.emissions() {
                        writeln!(writer, "{}\t{}", key, metric.raw)?;
                    }
                    stats.records_emitted += 1;
                }
                Err(reason) if reason.is_malformed() => {
                    stats.lines_malformed += 1;
                    debug!(
                        line = stats.lines_read,
                        reason = reason.label(),
                        "dropping malformed record"
                    );
                }
                Err(_) => {
                    stats.lines_filtered += 1;
                }
            }
        }

        writer.flush()?;
        Ok(stats)
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}
