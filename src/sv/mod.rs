//! Business logic services
//!
//! Each service borrows the database connection; handlers grab them through
//! [`crate::state::AppState::sv`]. The acting user is always an explicit
//! argument, never ambient state.

pub mod achievement;
pub mod activity;
pub mod challenge;
pub mod participation;
pub mod quote;
pub mod scoring;
pub mod streak;
pub mod user;

pub use achievement::Achievement;
pub use activity::Activity;
pub use challenge::Challenge;
pub use participation::Participation;
pub use quote::Quote;
pub use scoring::Scoring;
pub use streak::Streak;
pub use user::User;
