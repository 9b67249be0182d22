mod admin;
mod friend;
mod status;

pub mod dtos {
    pub use crate::admin::dtos::*;
    pub use crate::friend::dtos::*;
}

pub use crate::admin::api::*;
pub use crate::friend::api::*;
pub use crate::status::api::*;
