mod admin;
mod error;
mod friend;
mod lifecycle;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use connectu_infra::ConnectuContext;
use friend::FriendInviteCache;
pub use lifecycle::{
    ApplyStatusTransitionUseCase, EventLifecycleScheduler, RescheduleSummary, ScheduledTimer,
    TransitionOutcome,
};
use std::net::TcpListener;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    admin::configure_routes(cfg);
    friend::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    scheduler: EventLifecycleScheduler,
}

impl Application {
    pub async fn new(context: ConnectuContext) -> Result<Self, std::io::Error> {
        let scheduler = EventLifecycleScheduler::new(context.clone());
        Application::start_event_scheduler(&scheduler).await;

        let (server, port) = Application::configure_server(context, scheduler.clone()).await?;

        Ok(Self {
            server,
            port,
            scheduler,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheduler(&self) -> &EventLifecycleScheduler {
        &self.scheduler
    }

    /// Rebuilds the timers of all upcoming and live events. A failing store
    /// does not keep the server from starting, the admin route can rerun it.
    async fn start_event_scheduler(scheduler: &EventLifecycleScheduler) {
        match scheduler.reschedule_all().await {
            Ok(summary) => info!(
                "Event scheduler started with {} of {} events armed",
                summary.armed, summary.scanned
            ),
            Err(e) => error!("Unable to reschedule event status updates: {:?}", e),
        }
    }

    async fn configure_server(
        context: ConnectuContext,
        scheduler: EventLifecycleScheduler,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let invites = FriendInviteCache::new(
            context.sys.clone(),
            context.config.friend_invite_ttl_millis,
        );

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(context.clone()))
                .app_data(web::Data::new(scheduler.clone()))
                .app_data(web::Data::new(invites.clone()))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.scheduler.shutdown();
        res
    }
}
