pub mod technical;
pub mod time_decay;

pub use technical::{evaluate_rule, score_direction};
pub use time_decay::{apply_time_awareness, remaining_fraction};
