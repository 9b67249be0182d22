mod apply_status_transition;
mod scheduler;

pub use apply_status_transition::{ApplyStatusTransitionUseCase, TransitionOutcome};
pub use scheduler::{EventLifecycleScheduler, RescheduleSummary, ScheduledTimer};
