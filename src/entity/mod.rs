//! SeaORM entity definitions
//!
//! This module contains all database entity definitions for the challenge
//! tracker.

pub mod achievement;
pub mod activity_log;
pub mod challenge;
pub mod participation;
pub mod quote;
pub mod user;
pub mod user_achievement;
