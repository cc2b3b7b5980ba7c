//! Freshness decisions for the per-user news cache

use chrono::{DateTime, Duration, Utc};

use crate::models::{news::NewsCacheEntry, user::Preferences};

/// Decide whether a cached entry can still serve a read or must be refetched.
///
/// A preference change invalidates the entry regardless of age. Frequency is
/// a direct timestamp-delta comparison in whole hours, not a calendar-day
/// boundary.
pub fn needs_refetch(
    prev: Option<&NewsCacheEntry>,
    current: &Preferences,
    now: DateTime<Utc>,
) -> bool {
    let Some(entry) = prev else {
        return true;
    };

    if entry.preferences != *current {
        return true;
    }

    match Duration::try_hours(current.frequency) {
        Some(ttl) => now - entry.fetched_at >= ttl,
        // A frequency too large to represent never elapses
        None => false,
    }
}

/// Whether a successful login should trigger an email digest
pub fn digest_due(last_email_sent: Option<DateTime<Utc>>, frequency: i64, now: DateTime<Utc>) -> bool {
    match last_email_sent {
        None => true,
        Some(sent) => match Duration::try_hours(frequency) {
            Some(ttl) => now - sent >= ttl,
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::summary::SummaryStyle;

    fn preferences() -> Preferences {
        Preferences {
            country: "us".to_string(),
            category: "technology".to_string(),
            language: "en".to_string(),
            summary_style: SummaryStyle::Brief,
            frequency: 24,
        }
    }

    fn entry(fetched_at: DateTime<Utc>, preferences: Preferences) -> NewsCacheEntry {
        NewsCacheEntry {
            username: "alice".to_string(),
            fetched_at,
            preferences,
            articles: Vec::new(),
        }
    }

    #[test]
    fn test_no_prior_entry_refetches() {
        assert!(needs_refetch(None, &preferences(), Utc::now()));
    }

    #[test]
    fn test_changed_preferences_refetch_even_when_fresh() {
        let now = Utc::now();
        let prev = entry(now, preferences());

        let mut current = preferences();
        current.category = "sports".to_string();

        assert!(needs_refetch(Some(&prev), &current, now));
    }

    #[test]
    fn test_fresh_entry_with_same_preferences_is_reused() {
        let now = Utc::now();
        let prev = entry(now - Duration::hours(23), preferences());

        assert!(!needs_refetch(Some(&prev), &preferences(), now));
    }

    #[test]
    fn test_elapsed_frequency_refetches() {
        let now = Utc::now();
        let prev = entry(now - Duration::hours(25), preferences());

        assert!(needs_refetch(Some(&prev), &preferences(), now));
    }

    #[test]
    fn test_exact_frequency_boundary_refetches() {
        let now = Utc::now();
        let prev = entry(now - Duration::hours(24), preferences());

        assert!(needs_refetch(Some(&prev), &preferences(), now));
    }

    #[test]
    fn test_extreme_frequency_reuses_without_panicking() {
        let now = Utc::now();
        let mut current = preferences();
        current.frequency = i64::MAX;
        let prev = entry(now - Duration::hours(1000), current.clone());

        assert!(!needs_refetch(Some(&prev), &current, now));
    }

    #[test]
    fn test_digest_due_without_prior_send() {
        assert!(digest_due(None, 24, Utc::now()));
    }

    #[test]
    fn test_digest_not_due_when_recently_sent() {
        let now = Utc::now();
        assert!(!digest_due(Some(now - Duration::hours(2)), 24, now));
    }

    #[test]
    fn test_digest_due_after_frequency_elapsed() {
        let now = Utc::now();
        assert!(digest_due(Some(now - Duration::hours(25)), 24, now));
    }

    #[test]
    fn test_digest_with_extreme_frequency_is_never_due() {
        let now = Utc::now();
        assert!(!digest_due(Some(now - Duration::hours(1000)), i64::MAX, now));
    }
}
