use crate::error::ConnectuError;
use actix_web::HttpRequest;
use connectu_infra::ConnectuContext;

const API_KEY_HEADER: &str = "x-api-key";

/// Only lets the request through if it carries the admin api key
pub fn protect_admin_route(
    http_req: &HttpRequest,
    ctx: &ConnectuContext,
) -> Result<(), ConnectuError> {
    let api_key = http_req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ConnectuError::Unauthorized(format!("Missing the `{}` header", API_KEY_HEADER))
        })?;

    if api_key != ctx.config.admin_api_key {
        return Err(ConnectuError::Unauthorized(
            "The provided api key is not valid".into(),
        ));
    }
    Ok(())
}
