use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::heatmap::{HOURS_PER_SLOT, SLOTS_PER_DAY};

/// One completed focus session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusRecord {
    id: Uuid,
    completed_at: DateTime<Utc>,
    duration_secs: u64,
    /// Local hour (0-23) captured at creation; never recomputed.
    hour_of_day: u8,
}

impl FocusRecord {
    /// Create a record, taking the hour of day from `completed_at`'s own time zone.
    pub fn new<Tz: TimeZone>(duration_secs: u64, completed_at: &DateTime<Tz>) -> Self {
        Self {
            id: Uuid::new_v4(),
            completed_at: completed_at.with_timezone(&Utc),
            duration_secs,
            hour_of_day: completed_at.hour() as u8,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn hour_of_day(&self) -> u8 {
        self.hour_of_day
    }

    /// Heatmap slot for the stored hour; `None` for a corrupt hour value.
    pub fn slot(&self) -> Option<usize> {
        let slot = usize::from(self.hour_of_day / HOURS_PER_SLOT);
        (slot < SLOTS_PER_DAY).then_some(slot)
    }

    /// Calendar date of completion as seen from `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.completed_at.with_timezone(tz).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn hour_comes_from_local_time() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2026, 3, 2, 6, 30, 0).unwrap();
        let record = FocusRecord::new(1500, &local);

        assert_eq!(record.hour_of_day(), 6);
        assert_eq!(record.slot(), Some(0));
        assert_eq!(record.completed_at().hour(), 22);
        assert_eq!(
            record.local_date(&tz),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(
            record.local_date(&Utc),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
    }

    #[test]
    fn ids_are_unique() {
        let now = Utc::now();
        assert_ne!(FocusRecord::new(60, &now).id(), FocusRecord::new(60, &now).id());
    }

    #[test]
    fn corrupt_hour_has_no_slot() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "completed_at": "2026-03-02T06:00:00Z",
            "duration_secs": 1500,
            "hour_of_day": 24
        }"#;
        let record: FocusRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.slot(), None);
    }
}
