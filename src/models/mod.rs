pub mod aggregate;
pub mod pair;
pub mod record;

pub use aggregate::{AggregateResult, MeanAccumulator};
pub use pair::EmittedPair;
pub use record::{MetricField, RawRecord, SkipReason};
