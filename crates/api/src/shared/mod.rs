pub mod auth;
pub mod timers;
pub mod usecase;
