use super::apply_status_transition::{ApplyStatusTransitionUseCase, TransitionOutcome};
use crate::shared::{timers::TimerRegistry, usecase::execute};
use connectu_domain::{Event, EventStatus, StatusTransition, EVENT_LIVE_DURATION_MILLIS, ID};
use connectu_infra::ConnectuContext;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};

/// A pending status transition of an `Event`
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTimer {
    pub event_id: ID,
    pub transition: StatusTransition,
    /// Timestamp in millis at which the transition is applied
    pub fire_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RescheduleSummary {
    /// Number of `Event`s that were upcoming or live
    pub scanned: usize,
    /// Number of timers that were armed
    pub armed: usize,
}

/// Advances the status of `Event`s as wall clock time passes.
///
/// An upcoming `Event` goes live at its scheduled time and finishes one day
/// later, at which point its pending join requests are removed. Only the
/// next transition of an `Event` is ever armed, the finish timer is armed by
/// the go live timer when it fires.
///
/// Timers live in memory only. After a restart they are rebuilt from the
/// stored `Event`s by `reschedule_all`.
#[derive(Clone)]
pub struct EventLifecycleScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    ctx: ConnectuContext,
    timers: TimerRegistry<ID, StatusTransition>,
}

impl EventLifecycleScheduler {
    pub fn new(ctx: ConnectuContext) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                ctx,
                timers: TimerRegistry::new(),
            }),
        }
    }

    /// Arms the `Upcoming -> Live` timer of the `Event`.
    /// Returns false if no timer was armed.
    pub fn schedule_status_update(&self, event: &Event) -> bool {
        self.schedule(event, StatusTransition::GoLive)
    }

    /// Arms the `Live -> Finished` timer of the `Event`.
    /// Returns false if no timer was armed.
    pub fn schedule_finished_update(&self, event: &Event) -> bool {
        self.schedule(event, StatusTransition::Finish)
    }

    /// Arms the next transition of every upcoming and live `Event` in the store.
    ///
    /// Already pending timers of these `Event`s are replaced, so running this
    /// more than once never leaves more than one timer per `Event`.
    #[tracing::instrument(name = "Rescheduling event status updates", skip(self))]
    pub async fn reschedule_all(&self) -> anyhow::Result<RescheduleSummary> {
        let events = self
            .inner
            .ctx
            .repos
            .events
            .find_by_statuses(&[EventStatus::Upcoming, EventStatus::Live])
            .await?;

        let mut summary = RescheduleSummary {
            scanned: events.len(),
            armed: 0,
        };
        for event in &events {
            let armed = match event.status {
                EventStatus::Upcoming => self.schedule_status_update(event),
                EventStatus::Live => self.schedule_finished_update(event),
                EventStatus::Finished | EventStatus::Cancelled => false,
            };
            if armed {
                summary.armed += 1;
            }
        }

        info!(
            scanned = summary.scanned,
            armed = summary.armed,
            "Rescheduled event status updates"
        );
        Ok(summary)
    }

    /// Drops the pending timer of the `Event`. Returns false if there was none.
    pub fn cancel(&self, event_id: &ID) -> bool {
        let cancelled = self.inner.timers.cancel(event_id);
        if let Some(transition) = cancelled {
            info!(event_id = %event_id, "Cancelled pending transition {}", transition);
        }
        cancelled.is_some()
    }

    pub fn pending(&self) -> Vec<ScheduledTimer> {
        self.inner
            .timers
            .pending()
            .into_iter()
            .map(|timer| ScheduledTimer {
                event_id: timer.key,
                transition: timer.tag,
                fire_at: timer.fire_at,
            })
            .collect()
    }

    /// Drops all pending timers
    pub fn shutdown(&self) {
        let cancelled = self.inner.timers.cancel_all();
        info!("Event lifecycle scheduler stopped, {} timers dropped", cancelled);
    }

    fn schedule(&self, event: &Event, transition: StatusTransition) -> bool {
        if event.status != transition.from() {
            debug!(
                event_id = %event.id,
                status = %event.status,
                "Not arming transition {}",
                transition
            );
            return false;
        }

        let ctx = &self.inner.ctx;
        let now = ctx.sys.get_timestamp_millis();
        let fire_at = event.fire_at(transition, EVENT_LIVE_DURATION_MILLIS);
        let delay_millis = fire_at - now;
        if delay_millis <= 0 && !ctx.config.catch_up_overdue_events {
            debug!(
                event_id = %event.id,
                fire_at,
                "Transition {} is overdue, not arming it",
                transition
            );
            return false;
        }

        let scheduler = self.clone();
        let event_id = event.id.clone();
        self.inner.timers.arm(
            event.id.clone(),
            transition,
            fire_at,
            Duration::from_millis(delay_millis.max(0) as u64),
            move |generation| async move {
                scheduler.fire(event_id, transition, generation).await;
            },
        );
        debug!(
            event_id = %event.id,
            fire_at,
            "Armed transition {}",
            transition
        );
        true
    }

    async fn fire(&self, event_id: ID, transition: StatusTransition, generation: u64) {
        // Free the slot before doing any I/O so that arming the next
        // transition does not abort this task
        if self.inner.timers.release(&event_id, generation).is_none() {
            return;
        }

        let usecase = ApplyStatusTransitionUseCase {
            event_id,
            transition,
        };
        // Errors are logged by `execute`. Nothing is re-armed on failure,
        // the next rescan picks the event up again.
        if let Ok(TransitionOutcome::Applied(event)) = execute(usecase, &self.inner.ctx).await {
            if transition == StatusTransition::GoLive {
                self.schedule_finished_update(&event);
            }
        }
    }
}
