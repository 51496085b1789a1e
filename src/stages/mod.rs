pub mod grouped;
pub mod mapper;
pub mod reducer;

pub use grouped::{AggregateStats, GroupedAggregator};
pub use mapper::{MapStats, Mapper};
pub use reducer::{ReduceStats, Reducer};
