pub mod collection;
pub mod enums;
pub mod interval;
pub mod task;

pub use collection::TaskCollection;
pub use enums::{Outcome, Transition};
pub use interval::Interval;
pub use task::{Task, TaskId, Timestamp};
