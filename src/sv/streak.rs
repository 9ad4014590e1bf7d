//! Streak tracker - daily check-in state per user
//!
//! All comparisons run at calendar-day granularity and "today" comes from
//! the caller, so a request at 23:59 and one at 00:01 disagree on purpose.

use serde::Serialize;

use crate::{entity::user, prelude::*};

#[derive(Debug, Serialize)]
pub struct CheckIn {
  pub current_streak: i32,
  pub max_streak: i32,
  /// whether the streak counter grew compared to before the call; false
  /// means the user had already checked in today
  pub increased: bool,
}

#[derive(Debug, Serialize)]
pub struct StreakStatus {
  pub current_streak: i32,
  pub max_streak: i32,
  pub last_activity_date: Option<Date>,
  pub active: bool,
  pub needs_check_in: bool,
}

/// A streak counts as alive up to one full day after the last check-in.
/// The boundary is inclusive: checked in yesterday means still active.
pub fn is_streak_active(last_activity: Option<Date>, today: Date) -> bool {
  match last_activity {
    None => true,
    Some(last) => (today - last).num_days() <= 1,
  }
}

pub fn needs_check_in(last_activity: Option<Date>, today: Date) -> bool {
  last_activity != Some(today)
}

pub struct Streak<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Streak<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Daily check-in. Same-day repeats are a no-op; a next-day check-in
  /// extends the streak; any longer gap restarts it at 1.
  pub async fn check_in(
    &self,
    user: &user::Model,
    today: Date,
  ) -> Result<CheckIn> {
    let previous = user.current_streak;

    let current = match user.last_activity_date {
      None => 1,
      Some(last) if last == today => {
        return Ok(CheckIn {
          current_streak: previous,
          max_streak: user.max_streak,
          increased: false,
        });
      }
      Some(last) if (today - last).num_days() == 1 => previous + 1,
      Some(_) => 1,
    };

    let max = user.max_streak.max(current);

    user::ActiveModel {
      current_streak: Set(current),
      max_streak: Set(max),
      last_activity_date: Set(Some(today)),
      updated_at: Set(Some(Utc::now().naive_utc())),
      ..user.clone().into()
    }
    .update(self.db)
    .await?;

    Ok(CheckIn {
      current_streak: current,
      max_streak: max,
      increased: current > previous,
    })
  }

  pub fn status_of(&self, user: &user::Model, today: Date) -> StreakStatus {
    StreakStatus {
      current_streak: user.current_streak,
      max_streak: user.max_streak,
      last_activity_date: user.last_activity_date,
      active: is_streak_active(user.last_activity_date, today),
      needs_check_in: needs_check_in(user.last_activity_date, today),
    }
  }
}
