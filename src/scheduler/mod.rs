pub mod agenda;
pub mod ladder;
pub mod review;

pub use agenda::{classify, Agenda, Scheduled, DEFAULT_UPCOMING_WINDOW_HOURS};
pub use ladder::{Ladder, DEFAULT_STEPS};
pub use review::{apply_outcome, new_task};
