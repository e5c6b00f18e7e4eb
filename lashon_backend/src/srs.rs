use chrono::{DateTime, Duration, offset::Utc};

pub const MAX_LEVEL: i32 = 8;
pub const LEARNED_LEVEL: i32 = 1;
pub const MASTERED_LEVEL: i32 = 5;

/// Review interval after reaching `level`.
pub fn interval(level: i32) -> Duration {
    match level.max(0).min(MAX_LEVEL) {
        0 => Duration::minutes(10),
        1 => Duration::days(1),
        2 => Duration::days(3),
        3 => Duration::days(7),
        4 => Duration::days(14),
        5 => Duration::days(30),
        6 => Duration::days(60),
        7 => Duration::days(120),
        _ => Duration::days(240),
    }
}

pub fn next_level(level: i32, correct: bool) -> i32 {
    if correct {
        (level.max(0) + 1).min(MAX_LEVEL)
    } else {
        0
    }
}

/// New level and next review time after answering a card at `now`.
pub fn schedule(level: i32, correct: bool, now: DateTime<Utc>) -> (i32, DateTime<Utc>) {
    let new_level = next_level(level, correct);
    (new_level, now + interval(new_level))
}

/// Puts a card directly at `level`, as an explicit progress edit does.
pub fn reschedule_at(level: i32, now: DateTime<Utc>) -> (i32, DateTime<Utc>) {
    let level = level.max(0).min(MAX_LEVEL);
    (level, now + interval(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn correct_answers_climb_and_cap() {
        let mut level = 0;
        for _ in 0..20 {
            level = next_level(level, true);
        }
        assert_eq!(level, MAX_LEVEL);
    }

    #[test]
    fn incorrect_answer_resets() {
        assert_eq!(next_level(6, false), 0);
        assert_eq!(next_level(0, false), 0);
    }

    #[test]
    fn schedule_uses_interval_of_new_level() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let (level, due) = schedule(1, true, now);
        assert_eq!(level, 2);
        assert_eq!(due, now + Duration::days(3));

        let (level, due) = schedule(4, false, now);
        assert_eq!(level, 0);
        assert_eq!(due, now + Duration::minutes(10));
    }

    #[test]
    fn explicit_level_is_clamped() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(reschedule_at(-3, now).0, 0);
        assert_eq!(reschedule_at(42, now), (MAX_LEVEL, now + Duration::days(240)));
    }
}
