//! One-way export snapshot.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;

use crate::clock::AppDateKey;
use crate::record::DrinkTimestamp;
use crate::reconcile::DayView;
use crate::stats::TrackerStats;

/// Snapshot handed to the export collaborator. Never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub exported_at: String,
    pub history: Vec<AppDateKey>,
    pub drink_timestamps: Vec<DrinkTimestamp>,
    pub total_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub completion_rate: u32,
}

impl ExportSnapshot {
    pub fn new(view: &DayView, stats: &TrackerStats, exported_at: DateTime<FixedOffset>) -> Self {
        Self {
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            history: view.history.clone(),
            drink_timestamps: view.completion_timestamps.clone(),
            total_days: stats.total_days,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
            completion_rate: stats.completion_rate,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snapshot_field_names() {
        let today: AppDateKey = "2024-01-04".parse().unwrap();
        let view = DayView {
            today,
            drank_today: true,
            history: vec![today],
            completion_timestamps: vec![DrinkTimestamp {
                date: today,
                time: "9:00:00 AM".into(),
            }],
        };
        let stats = TrackerStats::compute(&view.history, today, today.date());
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 4, 9, 30, 0)
            .unwrap();

        let snapshot = ExportSnapshot::new(&view, &stats, at);
        let json: serde_json::Value =
            serde_json::from_str(&snapshot.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["exportedAt"], "2024-01-04T09:30:00+01:00");
        assert_eq!(json["history"][0], "2024-01-04");
        assert_eq!(json["drinkTimestamps"][0]["time"], "9:00:00 AM");
        assert_eq!(json["totalDays"], 1);
        assert_eq!(json["currentStreak"], 1);
        assert_eq!(json["longestStreak"], 1);
        assert_eq!(json["completionRate"], 100);
    }
}
