mod create_friend_invite;
mod get_friend_invite;
mod invite_cache;
mod redeem_friend_invite;

use actix_web::web;
use create_friend_invite::create_friend_invite_controller;
use get_friend_invite::get_friend_invite_controller;
pub use invite_cache::FriendInviteCache;
use redeem_friend_invite::redeem_friend_invite_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/friends/invites",
        web::post().to(create_friend_invite_controller),
    );
    cfg.route(
        "/friends/invites/{code}",
        web::get().to(get_friend_invite_controller),
    );
    cfg.route(
        "/friends/invites/{code}/redeem",
        web::post().to(redeem_friend_invite_controller),
    );
}
