mod event;
mod friend_invite;
mod join_request;
mod shared;

pub use event::{
    Event, EventStatus, InvalidEventStatusError, StatusTransition, EVENT_LIVE_DURATION_MILLIS,
};
pub use friend_invite::FriendInvite;
pub use join_request::EventJoinRequest;
pub use shared::entity::{Entity, InvalidIDError, ID};
