//! Post-decode checks on fetched snapshots.

use statbanner_core::{Error, NewsStats, Result, VimStats};

/// Checks serde can't express: finite, non-negative averages and so on.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Decode(format!("{} must be a non-negative number, got {}", name, value)))
    }
}

impl Validate for VimStats {
    fn validate(&self) -> Result<()> {
        non_negative("averageKeystrokes", self.average_keystrokes)?;
        non_negative("averageTimeTakenSeconds", self.average_time_taken_seconds)?;
        if self.unique_submitters > self.total_solutions {
            return Err(Error::Decode(format!(
                "uniqueSubmitters ({}) exceeds totalSolutions ({})",
                self.unique_submitters, self.total_solutions
            )));
        }
        Ok(())
    }
}

impl Validate for NewsStats {
    fn validate(&self) -> Result<()> {
        if self.new_users_today > self.total_users {
            return Err(Error::Decode(format!(
                "newUsersToday ({}) exceeds totalUsers ({})",
                self.new_users_today, self.total_users
            )));
        }
        Ok(())
    }
}
