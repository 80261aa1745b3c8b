//! Streak calculation over completed app days.

use std::collections::{BTreeSet, HashSet};

use crate::clock::AppDateKey;

/// Consecutive completed days ending at `today`.
///
/// Zero when today itself is not completed, even if yesterday was.
pub fn current_streak(history: &[AppDateKey], today: AppDateKey) -> u32 {
    let days: HashSet<AppDateKey> = history.iter().copied().collect();
    if !days.contains(&today) {
        return 0;
    }

    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        let prev = day.pred();
        if prev == day {
            break;
        }
        day = prev;
    }
    streak
}

/// Longest run of consecutive completed days anywhere in history.
pub fn longest_streak(history: &[AppDateKey]) -> u32 {
    let sorted: BTreeSet<AppDateKey> = history.iter().copied().collect();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<AppDateKey> = None;
    for day in sorted {
        run = match previous {
            Some(prev) if day.days_since(prev) == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keys(days: &[&str]) -> Vec<AppDateKey> {
        days.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn key(s: &str) -> AppDateKey {
        s.parse().unwrap()
    }

    #[test]
    fn gap_before_today() {
        let history = keys(&["2024-01-01", "2024-01-02", "2024-01-04"]);
        assert_eq!(current_streak(&history, key("2024-01-04")), 1);
        assert_eq!(longest_streak(&history), 2);
    }

    #[test]
    fn today_missing_means_zero() {
        let history = keys(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(current_streak(&history, key("2024-01-04")), 0);
        assert_eq!(longest_streak(&history), 3);
    }

    #[test]
    fn empty_history() {
        assert_eq!(current_streak(&[], key("2024-01-04")), 0);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn unordered_history_and_month_boundaries() {
        let history = keys(&["2024-03-01", "2024-02-28", "2024-02-29", "2024-02-27"]);
        assert_eq!(current_streak(&history, key("2024-03-01")), 4);
        assert_eq!(longest_streak(&history), 4);
    }

    #[test]
    fn final_run_counts_for_longest() {
        let history = keys(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
        ]);
        assert_eq!(longest_streak(&history), 3);
    }

    #[test]
    fn extending_a_run_adds_one() {
        let mut history = keys(&["2024-05-01", "2024-05-02", "2024-05-03"]);
        assert_eq!(current_streak(&history, key("2024-05-03")), 3);
        history.push(key("2024-05-04"));
        assert_eq!(current_streak(&history, key("2024-05-04")), 4);
        history.push(key("2024-05-06"));
        assert_eq!(current_streak(&history, key("2024-05-06")), 1);
    }

    proptest! {
        #[test]
        fn longest_is_at_least_current(
            offsets in proptest::collection::vec(0i64..60, 0..40),
            today_offset in 0i64..60,
        ) {
            let base = key("2024-01-01");
            let shift = |n: i64| AppDateKey::new(base.date() + chrono::Duration::days(n));
            let history: Vec<AppDateKey> = offsets.iter().map(|n| shift(*n)).collect();
            let today = shift(today_offset);
            prop_assert!(longest_streak(&history) >= current_streak(&history, today));
        }
    }
}
