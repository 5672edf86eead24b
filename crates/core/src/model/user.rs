use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Presentation theme attached to a user profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parses a wire theme value. Anything other than a case-insensitive
    /// `"dark"` is treated as light.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// The current user's identity and progression counters.
///
/// Created once per session from locally persisted state (or the fixed
/// default identity) and mutated by progress updates; never destroyed
/// within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    streak: u32,
    xp: u64,
    theme: Theme,
}

/// Partial overwrite of user fields, as delivered by the server profile.
///
/// Absent fields leave the local value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: Option<UserId>,
    pub name: Option<String>,
    pub streak: Option<u32>,
    pub xp: Option<u64>,
    pub theme: Option<Theme>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, streak: u32, xp: u64) -> Self {
        Self {
            id,
            name: name.into(),
            streak,
            xp,
            theme: Theme::Light,
        }
    }

    /// The fixed demo identity used when no valid local record exists.
    #[must_use]
    pub fn default_local() -> Self {
        Self::new(UserId::new(1), "Avinash", 7, 1250)
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Applies a server profile on top of the local user. Fields present in
    /// the update overwrite local values; absent fields are kept.
    pub fn merge(&mut self, update: UserUpdate) {
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(streak) = update.streak {
            self.streak = streak;
        }
        if let Some(xp) = update.xp {
            self.xp = xp;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
    }

    /// Awards XP for a completed quiz and extends the streak.
    ///
    /// Purely local: `xp` grows by `score / 10` (integer division) and the
    /// streak advances by one. This client-side ledger may drift from any
    /// server-side one; that drift is an accepted inconsistency.
    pub fn award_xp(&mut self, score: u8) -> u64 {
        let gain = u64::from(score) / 10;
        self.xp += gain;
        self.streak += 1;
        gain
    }

    /// Zeroes the streak at the day boundary.
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }
}
