use connectu_api::Application;
use connectu_infra::ConnectuContext;
use connectu_sdk::ConnectuSDK;

pub struct TestApp {
    pub ctx: ConnectuContext,
    pub address: String,
}

impl TestApp {
    pub fn admin_sdk(&self) -> ConnectuSDK {
        ConnectuSDK::new_admin(self.address.clone(), self.ctx.config.admin_api_key.clone())
    }
}

pub fn test_context() -> ConnectuContext {
    let mut ctx = ConnectuContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.catch_up_overdue_events = false;
    ctx
}

// Launch the application as a background task
pub async fn spawn_app_with(ctx: ConnectuContext) -> (TestApp, ConnectuSDK) {
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = ConnectuSDK::new(address.clone());
    (TestApp { ctx, address }, sdk)
}

pub async fn spawn_app() -> (TestApp, ConnectuSDK) {
    spawn_app_with(test_context()).await
}
