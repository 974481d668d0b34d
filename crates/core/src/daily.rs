//! Calendar-day idempotency gate and login-day accounting (PRD-03).
//!
//! Chest opening, daily task generation, and per-item purchases are each
//! limited to once per calendar day. The gate compares the persisted
//! last-performed date against today; the persisted stamp is the single
//! source of truth, so a reload cannot re-open a gate that already
//! committed.

use crate::types::CalendarDate;

// ---------------------------------------------------------------------------
// Daily gate
// ---------------------------------------------------------------------------

/// Whether a once-per-day action may run today.
///
/// True when the action has never run (`last` absent) or last ran on a
/// different calendar day. Only same-day equality matters; the length of
/// the gap does not.
pub fn can_perform(last: Option<CalendarDate>, today: CalendarDate) -> bool {
    match last {
        None => true,
        Some(date) => date != today,
    }
}

// ---------------------------------------------------------------------------
// Login-day counter
// ---------------------------------------------------------------------------

/// Result of advancing the login-day counter for a load on `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAdvance {
    /// Counter value after the advance.
    pub login_days: i64,
    /// Whether the counter and `last_login_date` stamp must be written back.
    /// Same-day loads repair a zeroed counter in the response only.
    pub persist: bool,
}

/// Advance the distinct-login-days counter.
///
/// The counter increments on any load whose calendar day differs from the
/// last recorded login. It deliberately does not check for consecutive
/// days: a five-day gap still adds exactly 1. A first-ever login starts
/// the counter at 1, and a same-day reload keeps it (repairing 0 to 1 for
/// rows created before the counter existed).
pub fn advance_login_days(
    last_login: Option<CalendarDate>,
    login_days: i64,
    today: CalendarDate,
) -> LoginAdvance {
    let current = login_days.max(0);
    match last_login {
        None => LoginAdvance {
            login_days: 1,
            persist: true,
        },
        Some(date) if date == today => LoginAdvance {
            login_days: current.max(1),
            persist: false,
        },
        Some(_) => LoginAdvance {
            login_days: current + 1,
            persist: true,
        },
    }
}
