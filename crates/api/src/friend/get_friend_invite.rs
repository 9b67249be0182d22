use super::FriendInviteCache;
use crate::error::ConnectuError;
use actix_web::{web, HttpResponse};
use connectu_api_structs::get_friend_invite::{APIResponse, PathParams};

pub async fn get_friend_invite_controller(
    path: web::Path<PathParams>,
    invites: web::Data<FriendInviteCache>,
) -> Result<HttpResponse, ConnectuError> {
    invites
        .get(&path.code)
        .map(|invite| HttpResponse::Ok().json(APIResponse::new(invite)))
        .ok_or_else(|| {
            ConnectuError::NotFound(format!(
                "The friend invite: {}, was not found or has expired.",
                path.code
            ))
        })
}
