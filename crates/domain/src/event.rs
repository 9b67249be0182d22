use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How long an `Event` stays `Live` before it is finished
pub const EVENT_LIVE_DURATION_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// The lifecycle status of an `Event`.
///
/// Status only ever advances `Upcoming -> Live -> Finished`. `Cancelled`
/// is set from outside the lifecycle and is never left again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Live,
    Finished,
    Cancelled,
}

impl EventStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    /// The transition that moves an `Event` out of this status, if any
    pub fn next_transition(&self) -> Option<StatusTransition> {
        match self {
            Self::Upcoming => Some(StatusTransition::GoLive),
            Self::Live => Some(StatusTransition::Finish),
            Self::Finished | Self::Cancelled => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidEventStatusError {
    #[error("Event status: {0} is not valid")]
    Unknown(String),
}

impl FromStr for EventStatus {
    type Err = InvalidEventStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "live" => Ok(Self::Live),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidEventStatusError::Unknown(s.to_string())),
        }
    }
}

/// A time driven advance of an `Event`s status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusTransition {
    /// `Upcoming -> Live`, due at the scheduled time of the `Event`
    GoLive,
    /// `Live -> Finished`, due when the `Event` has been live for a day
    Finish,
}

impl StatusTransition {
    pub fn from(&self) -> EventStatus {
        match self {
            Self::GoLive => EventStatus::Upcoming,
            Self::Finish => EventStatus::Live,
        }
    }

    pub fn to(&self) -> EventStatus {
        match self {
            Self::GoLive => EventStatus::Live,
            Self::Finish => EventStatus::Finished,
        }
    }
}

impl Display for StatusTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from(), self.to())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    /// The timestamp in millis at which the `Event` starts
    pub scheduled_ts: i64,
    pub status: EventStatus,
}

impl Event {
    pub fn new(scheduled_ts: i64) -> Self {
        Self {
            id: Default::default(),
            scheduled_ts,
            status: EventStatus::Upcoming,
        }
    }

    /// The timestamp at which the given transition is due
    pub fn fire_at(&self, transition: StatusTransition, live_duration_millis: i64) -> i64 {
        match transition {
            StatusTransition::GoLive => self.scheduled_ts,
            StatusTransition::Finish => self.scheduled_ts + live_duration_millis,
        }
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}
