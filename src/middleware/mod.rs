mod process_time;

pub use process_time::{process_time, PROCESS_TIME_HEADER};
