use crate::{
    error::ConnectuError, lifecycle::EventLifecycleScheduler, shared::auth::protect_admin_route,
};
use actix_web::{web, HttpRequest, HttpResponse};
use connectu_api_structs::reschedule_events::APIResponse;
use connectu_infra::ConnectuContext;
use tracing::error;

pub async fn reschedule_events_controller(
    http_req: HttpRequest,
    ctx: web::Data<ConnectuContext>,
    scheduler: web::Data<EventLifecycleScheduler>,
) -> Result<HttpResponse, ConnectuError> {
    protect_admin_route(&http_req, &ctx)?;

    let summary = scheduler.reschedule_all().await.map_err(|e| {
        error!("Unable to reschedule event status updates: {:?}", e);
        ConnectuError::InternalError
    })?;

    Ok(HttpResponse::Ok().json(APIResponse {
        scanned: summary.scanned,
        armed: summary.armed,
    }))
}
