//! XP curve, streaks, daily goals and quiz scoring.
//!
//! Everything in here is plain arithmetic over values read from the
//! database; the callers in `stats`, `vocab` and `lessons` apply the
//! results inside their transactions.

use chrono::NaiveDate;
use serde::Serialize;

/// Cumulative XP needed to reach level `i + 1`.
pub const LEVEL_BREAKPOINTS: [i32; 15] = [
    0, 100, 250, 500, 1000, 2000, 3500, 5500, 8000, 11000, 15000, 20000, 26000, 33000, 41000,
];

pub const MAX_LEVEL: i32 = LEVEL_BREAKPOINTS.len() as i32;

pub const XP_CORRECT_CARD: i32 = 10;
pub const XP_INCORRECT_CARD: i32 = 2;
pub const XP_PER_CORRECT_ANSWER: i32 = 10;
pub const XP_QUIZ_PASS_BONUS: i32 = 50;

pub fn level(xp: i32) -> i32 {
    LEVEL_BREAKPOINTS.iter()
        .rposition(|&breakpoint| xp >= breakpoint)
        .map(|i| i as i32 + 1)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LevelProgress {
    pub level: i32,
    pub xp: i32,
    pub current_level_xp: i32,
    pub next_level_xp: Option<i32>,
    pub percent: f64,
}

pub fn level_progress(xp: i32) -> LevelProgress {
    let level = level(xp);
    let current_level_xp = LEVEL_BREAKPOINTS[(level - 1) as usize];
    let next_level_xp = LEVEL_BREAKPOINTS.get(level as usize).cloned();
    let percent = match next_level_xp {
        Some(next) => {
            let gained = (xp.max(0) - current_level_xp) as f64;
            (gained / (next - current_level_xp) as f64 * 100.0).min(100.0)
        }
        None => 100.0,
    };
    LevelProgress { level, xp, current_level_xp, next_level_xp, percent }
}

/// Streak after studying on `today`, given the previous study day.
pub fn next_streak(streak: i32, last_studied: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let last = try_or!(last_studied, else return 1);
    let days_diff = today.signed_duration_since(last).num_days();
    match days_diff {
        d if d <= 0 => streak.max(1),
        1 => streak + 1,
        _ => 1,
    }
}

/// The streak as it should be displayed on `today`: a missed day breaks it
/// even before the next study session resets it.
pub fn current_streak(streak: i32, last_studied: Option<NaiveDate>, today: NaiveDate) -> i32 {
    match last_studied {
        Some(last) if today.signed_duration_since(last).num_days() <= 1 => streak,
        _ => 0,
    }
}

/// Cards studied today after adding `cards`; the counter restarts on a new day.
pub fn advance_daily_count(cards_today: i32,
                           last_reset: Option<NaiveDate>,
                           today: NaiveDate,
                           cards: i32)
                           -> i32 {
    if last_reset == Some(today) {
        cards_today + cards
    } else {
        cards
    }
}

/// Cards studied so far on `today`, as stored counters read.
pub fn cards_on(cards_today: i32, last_reset: Option<NaiveDate>, today: NaiveDate) -> i32 {
    if last_reset == Some(today) { cards_today } else { 0 }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyGoal {
    pub goal: i32,
    pub cards_today: i32,
    pub complete: bool,
    pub progress: f64,
}

pub fn daily_goal(cards_today: i32, goal: i32) -> DailyGoal {
    if goal <= 0 {
        return DailyGoal { goal, cards_today, complete: true, progress: 100.0 };
    }
    let progress = (cards_today.max(0) as f64 / goal as f64 * 100.0).min(100.0);
    DailyGoal {
        goal,
        cards_today,
        complete: cards_today >= goal,
        progress,
    }
}

pub fn card_xp(correct: bool) -> i32 {
    if correct { XP_CORRECT_CARD } else { XP_INCORRECT_CARD }
}

/// Integer percentage, rounded down. An empty quiz scores zero.
pub fn quiz_score(correct: i32, total: i32) -> i32 {
    if total <= 0 {
        return 0;
    }
    correct * 100 / total
}

pub fn quiz_passed(score: i32, min_score: i32) -> bool {
    score >= min_score
}

pub fn quiz_xp(correct: i32, passed: bool) -> i32 {
    correct * XP_PER_CORRECT_ANSWER + if passed { XP_QUIZ_PASS_BONUS } else { 0 }
}
