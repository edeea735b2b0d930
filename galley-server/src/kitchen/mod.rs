//! Kitchen domain logic
//!
//! The pure core behind the HTTP handlers: transition planning, queue
//! selection, priority/ETA decoration, assignment rules and daily stats.
//! Everything here is deterministic and store-free; the repositories apply
//! the results.

pub mod assignment;
pub mod eta;
pub mod lifecycle;
pub mod queue;
pub mod stats;

pub use eta::{TaskDecoration, decorate};
pub use lifecycle::{TransitionPlan, plan_transition};
pub use queue::{QueueSelection, SortDirection, StatusFilter};
pub use stats::DailyStats;
