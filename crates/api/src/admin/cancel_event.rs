use crate::{
    error::ConnectuError,
    lifecycle::EventLifecycleScheduler,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use connectu_api_structs::cancel_event::{APIResponse, PathParams};
use connectu_domain::{Event, EventStatus, ID};
use connectu_infra::ConnectuContext;

pub async fn cancel_event_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<ConnectuContext>,
    scheduler: web::Data<EventLifecycleScheduler>,
) -> Result<HttpResponse, ConnectuError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = CancelEventUseCase {
        event_id: path.event_id.clone(),
    };

    let event = execute(usecase, &ctx).await.map_err(ConnectuError::from)?;
    scheduler.cancel(&event.id);

    Ok(HttpResponse::Ok().json(APIResponse::new(event)))
}

#[derive(Debug)]
pub struct CancelEventUseCase {
    pub event_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    AlreadyEnded(EventStatus),
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for ConnectuError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::AlreadyEnded(status) => Self::Conflict(format!(
                "The event is already {} and can not be cancelled.",
                status
            )),
            UseCaseError::StorageError(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CancelEventUseCase {
    type Response = Event;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &ConnectuContext) -> Result<Self::Response, Self::Errors> {
        // A timer can advance the status between the read and the write,
        // in which case the cancel is tried again on the new status.
        loop {
            let mut event = match ctx.repos.events.find(&self.event_id).await {
                Ok(Some(event)) => event,
                Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
                Err(e) => return Err(UseCaseError::StorageError(e)),
            };
            if event.status.is_terminal() {
                return Err(UseCaseError::AlreadyEnded(event.status));
            }

            let saved = ctx
                .repos
                .events
                .save_status(&event.id, event.status, EventStatus::Cancelled)
                .await
                .map_err(UseCaseError::StorageError)?;
            if saved {
                event.status = EventStatus::Cancelled;
                return Ok(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancels_upcoming_events() {
        let ctx = ConnectuContext::create_inmemory();
        let event = Event::new(0);
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = CancelEventUseCase {
            event_id: event.id.clone(),
        };
        let cancelled = usecase.execute(&ctx).await.unwrap();
        assert_eq!(cancelled.status, EventStatus::Cancelled);

        let stored = ctx.repos.events.find(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EventStatus::Cancelled);
    }

    #[tokio::test]
    async fn rejects_events_that_already_ended() {
        let ctx = ConnectuContext::create_inmemory();
        let mut event = Event::new(0);
        event.status = EventStatus::Finished;
        ctx.repos.events.insert(&event).await.unwrap();

        let mut usecase = CancelEventUseCase {
            event_id: event.id.clone(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::AlreadyEnded(EventStatus::Finished))
        ));

        let mut usecase = CancelEventUseCase { event_id: ID::new() };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }
}
