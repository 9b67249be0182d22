use super::{invite_cache::RedeemError, FriendInviteCache};
use crate::error::ConnectuError;
use actix_web::{web, HttpResponse};
use connectu_api_structs::redeem_friend_invite::{APIResponse, PathParams, RequestBody};
use tracing::info;

pub async fn redeem_friend_invite_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    invites: web::Data<FriendInviteCache>,
) -> Result<HttpResponse, ConnectuError> {
    let invitee_id = body.0.user_id;
    let invite = invites
        .redeem(&path.code, &invitee_id)
        .map_err(|e| match e {
            RedeemError::NotFound => ConnectuError::NotFound(format!(
                "The friend invite: {}, was not found or has expired.",
                path.code
            )),
            RedeemError::SelfInvite => {
                ConnectuError::BadClientData("A user can not redeem their own invite.".into())
            }
        })?;
    info!(
        inviter_id = %invite.user_id,
        invitee_id = %invitee_id,
        "Friend invite redeemed"
    );

    Ok(HttpResponse::Ok().json(APIResponse {
        inviter_id: invite.user_id,
        invitee_id,
    }))
}
