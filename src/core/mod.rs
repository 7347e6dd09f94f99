pub mod granularity;
pub mod tick_iter;
pub mod time_mapping;
pub mod time_rounding;
pub mod time_tick;
pub mod time_zone;
pub mod window;

pub use granularity::{CalendarUnit, Granularity, SECONDS_PER_DAY, TickSize};
pub use tick_iter::{MAX_TICKS_PER_ITER, TickIter, extension_granularity, time_min_max};
pub use time_mapping::{
    epoch_seconds_of, global_index_of, global_index_of_time, local_index_of, localize_index,
    time_of_global_index, timestamp_of, to_epoch_seconds,
};
pub use time_rounding::{RoundingMode, round_time, time_tail};
pub use time_tick::{TickHAlign, TickVAlign, TimeTick};
pub use time_zone::{AxisTimeZone, ResolvedTimeZone, TimeAxisTimeZone};
pub use window::{Orientation, VisibleWindow};
