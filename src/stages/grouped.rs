use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::models::{EmittedPair, MeanAccumulator, RawRecord};
use crate::stages::reducer::flush_group;
use crate::stages::{MapStats, ReduceStats};

/// Combined counters for the single-process mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub map: MapStats,
    pub reduce: ReduceStats,
}

/// Grouped aggregation without the external sort: an explicit key →
/// running-mean map instead of the streaming group-by. Memory grows with
/// the number of distinct keys rather than staying bounded by one run,
/// which is the documented deviation from the streaming contract. Keys
/// flush in byte-lexicographic order, so the output bytes match
/// `map | sort | reduce` over the same input.
pub struct GroupedAggregator;

impl GroupedAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Reduce a pair stream that need not be sorted. Every occurrence of
    /// a key lands in the same accumulator no matter where it appears.
    pub fn reduce_unsorted<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<ReduceStats> {
        let mut stats = ReduceStats::default();
        let mut groups: BTreeMap<String, MeanAccumulator> = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            stats.lines_read += 1;

            match EmittedPair::parse(&line) {
                Some(pair) => {
                    groups
                        .entry(pair.key.to_string())
                        .or_default()
                        .push(pair.value);
                }
                None => {
                    stats.lines_skipped += 1;
                    debug!(line = stats.lines_read, "skipping unparseable pair line");
                }
            }
        }

        self.flush_all(&groups, writer, &mut stats)?;
        Ok(stats)
    }

    /// Map and reduce in one pass: raw climate CSV in, aggregated rows
    /// out. Record filtering is identical to the map stage's; non-finite
    /// metric values never reach a group, matching the reduce stage's
    /// finite-value rule.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, writer: &mut W) -> Result<AggregateStats> {
        let mut stats = AggregateStats::default();
        let mut groups: BTreeMap<String, MeanAccumulator> = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            stats.map.lines_read += 1;

            match RawRecord::parse(&line) {
                Ok(record) => {
                    for (key, metric) in record.emissions() {
                        stats.reduce.lines_read += 1;
                        if metric.value.is_finite() {
                            groups.entry(key).or_default().push(metric.value);
                        } else {
                            stats.reduce.lines_skipped += 1;
                        }
                    }
                    stats.map.records_emitted += 1;
                }
                Err(reason) if reason.is_malformed() => {
                    stats.map.lines_malformed += 1;
                    debug!(
                        line = stats.map.lines_read,
                        reason = reason.label(),
                        "dropping malformed record"
                    );
                }
                Err(_) => {
                    stats.map.lines_filtered += 1;
                }
            }
        }

        self.flush_all(&groups, writer, &mut stats.reduce)?;
        Ok(stats)
    }

    fn flush_all<W: Write>(
        &self,
        groups: &BTreeMap<String, MeanAccumulator>,
        writer: &mut W,
        stats: &mut ReduceStats,
    ) -> Result<()> {
        for (key, acc) in groups {
            flush_group(key, acc, writer, stats)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for GroupedAggregator {
    fn default() -> Self {
        Self::new()
    }
}
