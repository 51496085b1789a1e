use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{AggregateResult, EmittedPair, MeanAccumulator};

/// Per-run reducer counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReduceStats {
    pub lines_read: u64,
    pub lines_skipped: u64,
    pub groups_flushed: u64,
}

/// The reduce stage: a streaming group-by over a key-sorted pair
/// stream. Holds one running accumulator for the active key, flushing it
/// when the key changes and once more at end of input.
///
/// Correct only under the sort contract: every occurrence of a key must
/// arrive in one contiguous run. A key that reappears after another key
/// has intervened is flushed again, producing two partial averages under
/// the same key, with no detection. Memory stays constant per group
/// regardless of run length.
pub struct Reducer;

impl Reducer {
    pub fn new() -> Self {
        Self
    }

    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<ReduceStats> {
        let mut stats = ReduceStats::default();
        let mut current: Option<(String, MeanAccumulator)> = None;

        for line in reader.lines() {
            let line = line?;
            stats.lines_read += 1;

            let pair = match EmittedPair::parse(&line) {
                Some(pair) => pair,
                None => {
                    stats.lines_skipped += 1;
                    debug!(line = stats.lines_read, "skipping unparseable pair line");
                    continue;
                }
            };

            match current.as_mut() {
                Some((key, acc)) if key.as_str() == pair.key => acc.push(pair.value),
                _ => {
                    if let Some((key, acc)) = current.take() {
                        flush_group(&key, &acc, writer, &mut stats)?;
                    }
                    let mut acc = MeanAccumulator::new();
                    acc.push(pair.value);
                    current = Some((pair.key.to_string(), acc));
                }
            }
        }

        // final sentinel flush; an empty stream never reaches here with
        // an active group
        if let Some((key, acc)) = current.take() {
            flush_group(&key, &acc, writer, &mut stats)?;
        }

        writer.flush()?;
        Ok(stats)
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn flush_group<W: Write>(
    key: &str,
    acc: &MeanAccumulator,
    writer: &mut W,
    stats: &mut ReduceStats,
) -> Result<()> {
    if let Some(average) = acc.mean() {
        let result = AggregateResult {
            key: key.to_string(),
            average,
        };
        writeln!(writer, "{}", result)?;
        stats.groups_flushed += 1;
    }
    Ok(())
}
