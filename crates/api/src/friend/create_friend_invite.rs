use super::FriendInviteCache;
use crate::error::ConnectuError;
use actix_web::{web, HttpResponse};
use connectu_api_structs::create_friend_invite::{APIResponse, RequestBody};
use tracing::info;

pub async fn create_friend_invite_controller(
    body: web::Json<RequestBody>,
    invites: web::Data<FriendInviteCache>,
) -> Result<HttpResponse, ConnectuError> {
    let invite = invites.create(body.0.user_id);
    info!(user_id = %invite.user_id, "Created friend invite");

    Ok(HttpResponse::Created().json(APIResponse::new(invite)))
}
