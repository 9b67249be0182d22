use crate::{
    error::ConnectuError, lifecycle::EventLifecycleScheduler, shared::auth::protect_admin_route,
};
use actix_web::{web, HttpRequest, HttpResponse};
use connectu_api_structs::{dtos::ScheduledTimerDTO, get_scheduled_timers::APIResponse};
use connectu_infra::ConnectuContext;

pub async fn get_scheduled_timers_controller(
    http_req: HttpRequest,
    ctx: web::Data<ConnectuContext>,
    scheduler: web::Data<EventLifecycleScheduler>,
) -> Result<HttpResponse, ConnectuError> {
    protect_admin_route(&http_req, &ctx)?;

    let timers = scheduler
        .pending()
        .into_iter()
        .map(|timer| ScheduledTimerDTO {
            event_id: timer.event_id,
            transition: timer.transition,
            fire_at: timer.fire_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(APIResponse { timers }))
}
