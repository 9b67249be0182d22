mod cancel_event;
mod get_scheduled_timers;
mod reschedule_events;

use actix_web::web;
use cancel_event::cancel_event_controller;
use get_scheduled_timers::get_scheduled_timers_controller;
use reschedule_events::reschedule_events_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/events/reschedule",
        web::post().to(reschedule_events_controller),
    );
    cfg.route(
        "/admin/events/timers",
        web::get().to(get_scheduled_timers_controller),
    );
    cfg.route(
        "/admin/events/{event_id}/cancel",
        web::post().to(cancel_event_controller),
    );
}
