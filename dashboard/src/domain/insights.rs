//! Derived values shown on the dashboard cards.
//!
//! Everything here is a pure single pass over data the hooks or the ledger
//! already hold.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike, Utc};
use shared::{Booking, BookingStatus, HomeworkAssignment, StudentProgress};
use std::fmt;

use crate::domain::coin_ledger::CoinLedger;

/// Time-of-day greeting for the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=16 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn now() -> Self {
        Self::for_hour(Local::now().hour())
    }

    pub fn text(self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
        }
    }

    /// "Good morning, Anita!" or just "Good morning!" without a name
    pub fn address(self, name: Option<&str>) -> String {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => format!("{}, {}!", self.text(), name),
            None => format!("{}!", self.text()),
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Whole-number percentage, rounded half-up and clamped to 100
pub fn progress_percentage(completed: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u128::from(completed.min(total));
    let total = u128::from(total);
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Lesson completion across every subject
pub fn overall_progress(progress: &StudentProgress) -> u8 {
    let (completed, total) = progress
        .subjects
        .iter()
        .fold((0u64, 0u64), |(done, all), subject| {
            (
                done + u64::from(subject.completed_lessons.min(subject.total_lessons)),
                all + u64::from(subject.total_lessons),
            )
        });
    progress_percentage(completed, total)
}

/// Share of assignments already submitted or graded
pub fn homework_completion_rate(assignments: &[HomeworkAssignment]) -> u8 {
    let done = assignments.iter().filter(|a| a.status.is_done()).count() as u64;
    progress_percentage(done, assignments.len() as u64)
}

/// Scheduled bookings that start after `now`, soonest first
pub fn upcoming_bookings(bookings: &[Booking], now: DateTime<Utc>, limit: usize) -> Vec<&Booking> {
    let mut upcoming: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Scheduled && b.starts_at > now)
        .collect();
    upcoming.sort_by_key(|b| b.starts_at);
    upcoming.truncate(limit);
    upcoming
}

/// First instant of a local calendar day, or of its first existing hour when
/// the zone skips midnight
fn start_of_local_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = day.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|start| start.with_timezone(&Utc))
}

/// `[start, end)` of a local calendar day in UTC; 23 or 25 hours long on
/// daylight-saving transition days
pub fn local_day_bounds<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = start_of_local_day(day, tz)?;
    let end = day
        .succ_opt()
        .and_then(|next| start_of_local_day(next, tz))
        .unwrap_or(start + Duration::days(1));
    Some((start, end))
}

/// Coins a child earned on a calendar day in the given time zone
pub fn coins_earned_on<Tz: TimeZone>(ledger: &CoinLedger, child_id: &str, day: NaiveDate, tz: &Tz) -> u64 {
    match local_day_bounds(day, tz) {
        Some((start, end)) => ledger.coins_earned_between(child_id, start, end),
        None => 0,
    }
}

/// Coins a child earned since local midnight
pub fn coins_earned_today(ledger: &CoinLedger, child_id: &str) -> u64 {
    coins_earned_on(ledger, child_id, Local::now().date_naive(), &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coin_ledger::UnknownChildPolicy;
    use chrono::{FixedOffset, LocalResult, NaiveDateTime};
    use shared::{CoinCategory, HomeworkStatus, SubjectProgress};

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(16), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Evening);
        assert_eq!(Greeting::for_hour(23), Greeting::Evening);
    }

    #[test]
    fn test_greeting_address() {
        assert_eq!(Greeting::Morning.address(Some("Anita")), "Good morning, Anita!");
        assert_eq!(Greeting::Evening.address(Some("  ")), "Good evening!");
        assert_eq!(Greeting::Afternoon.address(None), "Good afternoon!");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(progress_percentage(5, 0), 0);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(progress_percentage(10, 10), 100);
        assert_eq!(progress_percentage(12, 10), 100);
        assert_eq!(progress_percentage(u64::MAX, u64::MAX), 100);
        assert_eq!(progress_percentage(u64::MAX / 2, u64::MAX), 50);
    }

    fn subject(name: &str, completed: u32, total: u32) -> SubjectProgress {
        SubjectProgress {
            subject: name.to_string(),
            completed_lessons: completed,
            total_lessons: total,
            average_score: None,
        }
    }

    #[test]
    fn test_overall_progress() {
        let progress = StudentProgress {
            child_id: "priya".to_string(),
            subjects: vec![subject("Maths", 6, 10), subject("English", 4, 10), subject("Art", 9, 5)],
            streak_days: 3,
            attendance_rate: Some(0.9),
        };
        // 6 + 4 + 5 (capped) out of 25
        assert_eq!(overall_progress(&progress), 60);

        let empty = StudentProgress {
            child_id: "sara".to_string(),
            subjects: vec![],
            streak_days: 0,
            attendance_rate: None,
        };
        assert_eq!(overall_progress(&empty), 0);
    }

    #[test]
    fn test_overall_progress_with_huge_lesson_counts() {
        let progress = StudentProgress {
            child_id: "arjun".to_string(),
            subjects: vec![
                subject("Maths", 4_000_000_000, 4_000_000_000),
                subject("English", 1, 4_000_000_000),
                subject("Art", u32::MAX, u32::MAX),
            ],
            streak_days: 0,
            attendance_rate: None,
        };
        // lesson sums pass u32::MAX; 8_294_967_296 of 12_294_967_295 is 67.47%
        assert_eq!(overall_progress(&progress), 67);
    }

    fn assignment(id: &str, status: HomeworkStatus) -> HomeworkAssignment {
        HomeworkAssignment {
            id: id.to_string(),
            child_id: "arjun".to_string(),
            title: format!("Assignment {}", id),
            subject: "Science".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            status,
            score: None,
        }
    }

    #[test]
    fn test_homework_completion_rate() {
        let assignments = vec![
            assignment("1", HomeworkStatus::Graded),
            assignment("2", HomeworkStatus::Submitted),
            assignment("3", HomeworkStatus::Pending),
            assignment("4", HomeworkStatus::Overdue),
        ];
        assert_eq!(homework_completion_rate(&assignments), 50);
        assert_eq!(homework_completion_rate(&[]), 0);
    }

    fn booking(id: &str, starts_at: DateTime<Utc>, status: BookingStatus) -> Booking {
        Booking {
            id: id.to_string(),
            child_id: "sara".to_string(),
            subject: "English".to_string(),
            tutor_name: None,
            starts_at,
            duration_minutes: 45,
            status,
        }
    }

    #[test]
    fn test_upcoming_bookings() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let bookings = vec![
            booking("later", now + Duration::days(3), BookingStatus::Scheduled),
            booking("past", now - Duration::hours(1), BookingStatus::Scheduled),
            booking("cancelled", now + Duration::hours(2), BookingStatus::Cancelled),
            booking("soon", now + Duration::hours(1), BookingStatus::Scheduled),
            booking("next-week", now + Duration::days(7), BookingStatus::Scheduled),
        ];

        let upcoming: Vec<&str> = upcoming_bookings(&bookings, now, 2)
            .into_iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(upcoming, vec!["soon", "later"]);
    }

    #[test]
    fn test_coins_earned_on_day() {
        let mut ledger = CoinLedger::empty(UnknownChildPolicy::AcceptAndCreate);
        let morning = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let yesterday = morning - Duration::days(1);

        // oldest first so the head timestamp stays in order
        ledger
            .add_coins_at("priya", CoinCategory::GameCompletion, "Yesterday", yesterday)
            .unwrap();
        ledger
            .add_coins_at("priya", CoinCategory::ClassCompletion, "Class", morning)
            .unwrap();
        ledger
            .add_coins_at("priya", CoinCategory::HomeworkSubmission, "Worksheet", morning)
            .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(coins_earned_on(&ledger, "priya", day, &Utc), 15);
        assert_eq!(coins_earned_on(&ledger, "priya", day.pred_opt().unwrap(), &Utc), 15);
        assert_eq!(coins_earned_on(&ledger, "arjun", day, &Utc), 0);
    }

    #[test]
    fn test_coins_earned_on_uses_the_local_calendar_day() {
        let mut ledger = CoinLedger::empty(UnknownChildPolicy::AcceptAndCreate);
        // 19:00 UTC is already 00:30 on the 11th in UTC+05:30
        let late_evening = Utc.with_ymd_and_hms(2025, 3, 10, 19, 0, 0).unwrap();
        ledger
            .add_coins_at("arjun", CoinCategory::HomeworkSubmission, "Worksheet", late_evening)
            .unwrap();

        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let tenth = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let eleventh = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert_eq!(coins_earned_on(&ledger, "arjun", tenth, &ist), 0);
        assert_eq!(coins_earned_on(&ledger, "arjun", eleventh, &ist), 5);
        assert_eq!(coins_earned_on(&ledger, "arjun", tenth, &Utc), 5);
    }

    /// +00:00 until 2025-03-30 01:00 UTC, +01:00 afterwards; local 01:00-02:00 is skipped
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, 3, 30)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch();
            if *local < switch {
                LocalResult::Single(Self::winter())
            } else if *local < switch + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn test_short_daylight_saving_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let (start, end) = local_day_bounds(day, &SpringForward).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 30, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 30, 23, 0, 0).unwrap());
        assert_eq!(end - start, Duration::hours(23));

        // 23:30 UTC is 00:30 local on the 31st
        let mut ledger = CoinLedger::empty(UnknownChildPolicy::AcceptAndCreate);
        let after_local_midnight = Utc.with_ymd_and_hms(2025, 3, 30, 23, 30, 0).unwrap();
        ledger
            .add_coins_at("sara", CoinCategory::GameCompletion, "Puzzle", after_local_midnight)
            .unwrap();
        assert_eq!(coins_earned_on(&ledger, "sara", day, &SpringForward), 0);
        assert_eq!(coins_earned_on(&ledger, "sara", day.succ_opt().unwrap(), &SpringForward), 15);
    }
}
