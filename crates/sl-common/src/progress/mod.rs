pub mod insights;
pub mod screening;

pub use screening::{
    accelerated_tick, background_tick, percentage, progress_text, time_remaining_hours,
    time_remaining_text, TickOutcome, ACCELERATED_STEP, BACKGROUND_STEP, SCREENING_COMPLETE,
};
