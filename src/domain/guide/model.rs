//! Guide profile domain entity

use chrono::{DateTime, Duration, Months, Utc};

/// Guide profile attached to a GUIDE account.
///
/// `cv_approved` is only ever set together with `approved_at`; use
/// [`GuideProfile::approve`] rather than flipping the flag directly.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideProfile {
    pub user_id: String,
    /// Storage key of the uploaded CV document
    pub cv: Option<String>,
    pub cv_approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub subscription_active: bool,
    /// Advisory only, nothing enforces it
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

impl GuideProfile {
    /// Profile created at registration: no CV, not approved, no subscription.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            cv: None,
            cv_approved: false,
            approved_at: None,
            subscription_active: false,
            subscription_expires_at: None,
        }
    }

    /// Mark the CV approved. Re-approving moves the timestamp forward.
    pub fn approve(&mut self, at: DateTime<Utc>) {
        self.cv_approved = true;
        self.approved_at = Some(at);
    }

    /// Replace the CV. Approval state is left untouched.
    pub fn attach_cv(&mut self, key: impl Into<String>) {
        self.cv = Some(key.into());
    }

    pub fn activate_subscription(&mut self, now: DateTime<Utc>) {
        self.subscription_active = true;
        self.subscription_expires_at = Some(subscription_expiry(now));
    }

    pub fn is_approved(&self) -> bool {
        self.cv_approved && self.approved_at.is_some()
    }
}

/// One calendar month after `from`.
pub fn subscription_expiry(from: DateTime<Utc>) -> DateTime<Utc> {
    from.checked_add_months(Months::new(1))
        .unwrap_or(from + Duration::days(30))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_profile_is_unapproved_without_cv() {
        let p = GuideProfile::new("g-1");
        assert!(!p.cv_approved);
        assert!(p.approved_at.is_none());
        assert!(p.cv.is_none());
        assert!(!p.is_approved());
    }

    #[test]
    fn approve_sets_flag_and_timestamp_together() {
        let mut p = GuideProfile::new("g-1");
        let at = Utc::now();
        p.approve(at);
        assert!(p.cv_approved);
        assert_eq!(p.approved_at, Some(at));
        assert!(p.is_approved());
    }

    #[test]
    fn reapproval_moves_timestamp_forward() {
        let mut p = GuideProfile::new("g-1");
        let first = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();
        p.approve(first);
        p.approve(second);
        assert!(p.cv_approved);
        assert_eq!(p.approved_at, Some(second));
    }

    #[test]
    fn attaching_cv_does_not_approve() {
        let mut p = GuideProfile::new("g-1");
        p.attach_cv("1700000000000-g-1-cv.pdf");
        assert_eq!(p.cv.as_deref(), Some("1700000000000-g-1-cv.pdf"));
        assert!(!p.cv_approved);
    }

    #[test]
    fn subscription_runs_one_calendar_month() {
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        let mut p = GuideProfile::new("g-1");
        p.activate_subscription(start);
        assert!(p.subscription_active);
        assert_eq!(
            p.subscription_expires_at,
            Some(Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap())
        );
        assert!(!p.cv_approved);
    }
}
