use crate::shared::usecase::{Subscriber, UseCase};
use connectu_domain::{Event, EventStatus, StatusTransition, ID};
use connectu_infra::ConnectuContext;
use std::time::Duration;
use tracing::{error, info, warn};

/// Moves an `Event` one step along its lifecycle when its timer fires
#[derive(Debug)]
pub struct ApplyStatusTransitionUseCase {
    pub event_id: ID,
    pub transition: StatusTransition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// The new status was persisted
    Applied(Event),
    /// The `Event` was not in the status the transition starts from,
    /// e.g. because it was cancelled while the timer was pending
    Skipped { found: EventStatus },
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError(anyhow::Error),
}

fn next_backoff(backoff: Duration) -> Duration {
    backoff.saturating_mul(2)
}

/// Moves the stored status along the transition, retrying with an exponential
/// backoff. Every attempt only succeeds while the stored status is still the
/// one the transition starts from, so returns false once it has moved on.
async fn save_with_retry(
    event_id: &ID,
    transition: StatusTransition,
    ctx: &ConnectuContext,
) -> anyhow::Result<bool> {
    let max_attempts = ctx.config.status_save_attempts.max(1);
    let mut backoff = Duration::from_millis(ctx.config.status_save_backoff_millis);
    let mut attempt = 1;
    loop {
        let saved = ctx
            .repos
            .events
            .save_status(event_id, transition.from(), transition.to())
            .await;
        match saved {
            Ok(saved) => return Ok(saved),
            Err(e) if attempt < max_attempts => {
                warn!(
                    event_id = %event_id,
                    attempt,
                    "Unable to save event status: {:?}. Retrying in {:?}",
                    e,
                    backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = next_backoff(backoff);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn find_event(event_id: &ID, ctx: &ConnectuContext) -> Result<Event, UseCaseError> {
    match ctx.repos.events.find(event_id).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(UseCaseError::NotFound(event_id.clone())),
        Err(e) => Err(UseCaseError::StorageError(e)),
    }
}

fn skip(event: &Event, transition: StatusTransition) -> TransitionOutcome {
    warn!(
        event_id = %event.id,
        status = %event.status,
        "Skipping transition {} as the event is no longer {}",
        transition,
        transition.from()
    );
    TransitionOutcome::Skipped {
        found: event.status,
    }
}

#[async_trait::async_trait]
impl UseCase for ApplyStatusTransitionUseCase {
    type Response = TransitionOutcome;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &ConnectuContext) -> Result<Self::Response, Self::Errors> {
        // Re-read the event, the status might have been changed since the timer was armed
        let mut event = find_event(&self.event_id, ctx).await?;
        if event.status != self.transition.from() {
            return Ok(skip(&event, self.transition));
        }

        let saved = save_with_retry(&event.id, self.transition, ctx)
            .await
            .map_err(UseCaseError::StorageError)?;
        if !saved {
            // Changed by someone else while saving
            let current = find_event(&self.event_id, ctx).await?;
            return Ok(skip(&current, self.transition));
        }

        event.status = self.transition.to();
        info!(event_id = %event.id, "Event status changed: {}", self.transition);
        Ok(TransitionOutcome::Applied(event))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RemoveJoinRequestsOnFinished)]
    }
}

/// Deletes the pending join requests of an `Event` once it has finished.
/// A failure is logged and not retried.
pub struct RemoveJoinRequestsOnFinished;

#[async_trait::async_trait]
impl Subscriber<ApplyStatusTransitionUseCase> for RemoveJoinRequestsOnFinished {
    async fn notify(&self, outcome: &TransitionOutcome, ctx: &ConnectuContext) {
        let event = match outcome {
            TransitionOutcome::Applied(event) if event.status == EventStatus::Finished => event,
            _ => return,
        };

        match ctx
            .repos
            .event_join_requests
            .delete_by_event(&event.id)
            .await
        {
            Ok(res) => info!(
                event_id = %event.id,
                deleted = res.deleted_count,
                "Removed join requests of finished event"
            ),
            Err(e) => error!(
                event_id = %event.id,
                "Unable to remove join requests of finished event: {:?}",
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use connectu_domain::EventJoinRequest;

    #[tokio::test]
    async fn finishing_an_event_removes_its_join_requests() {
        let ctx = ConnectuContext::create_inmemory();
        let mut event = Event::new(0);
        event.status = EventStatus::Live;
        ctx.repos.events.insert(&event).await.unwrap();
        ctx.repos
            .event_join_requests
            .insert(&EventJoinRequest::new(event.id.clone(), ID::new(), 0))
            .await
            .unwrap();

        let usecase = ApplyStatusTransitionUseCase {
            event_id: event.id.clone(),
            transition: StatusTransition::Finish,
        };
        let outcome = execute(usecase, &ctx).await.unwrap();

        event.status = EventStatus::Finished;
        assert_eq!(outcome, TransitionOutcome::Applied(event.clone()));
        assert!(ctx
            .repos
            .event_join_requests
            .find_by_event(&event.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn going_live_keeps_join_requests() {
        let ctx = ConnectuContext::create_inmemory();
        let event = Event::new(0);
        ctx.repos.events.insert(&event).await.unwrap();
        ctx.repos
            .event_join_requests
            .insert(&EventJoinRequest::new(event.id.clone(), ID::new(), 0))
            .await
            .unwrap();

        let usecase = ApplyStatusTransitionUseCase {
            event_id: event.id.clone(),
            transition: StatusTransition::GoLive,
        };
        let outcome = execute(usecase, &ctx).await.unwrap();

        assert!(matches!(outcome, TransitionOutcome::Applied(e) if e.status == EventStatus::Live));
        assert_eq!(
            ctx.repos
                .event_join_requests
                .find_by_event(&event.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn skips_events_that_moved_on() {
        let ctx = ConnectuContext::create_inmemory();
        let mut event = Event::new(0);
        event.status = EventStatus::Cancelled;
        ctx.repos.events.insert(&event).await.unwrap();

        let usecase = ApplyStatusTransitionUseCase {
            event_id: event.id.clone(),
            transition: StatusTransition::GoLive,
        };
        let outcome = execute(usecase, &ctx).await.unwrap();

        assert_eq!(
            outcome,
            TransitionOutcome::Skipped {
                found: EventStatus::Cancelled
            }
        );
        let stored = ctx.repos.events.find(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EventStatus::Cancelled);
    }

    #[tokio::test]
    async fn unknown_events_are_an_error() {
        let ctx = ConnectuContext::create_inmemory();
        let usecase = ApplyStatusTransitionUseCase {
            event_id: ID::new(),
            transition: StatusTransition::GoLive,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[test]
    fn backoff_doubles_without_overflowing() {
        assert_eq!(
            next_backoff(Duration::from_millis(500)),
            Duration::from_millis(1000)
        );
        assert_eq!(next_backoff(Duration::MAX), Duration::MAX);
    }
}
