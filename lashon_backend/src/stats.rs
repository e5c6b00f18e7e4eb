//! The per-user `user_stats` row.
//!
//! Counters are only ever changed with `SET x = x + $1` or under a
//! `SELECT ... FOR UPDATE` lock, so concurrent requests from the same
//! user don't lose updates.

use super::*;
use crate::gamification::{self, DailyGoal, LevelProgress};
use crate::schema::user_stats;
use chrono::NaiveDate;
use serde::Serialize;

pub const MIN_DAILY_GOAL: i32 = 1;
pub const MAX_DAILY_GOAL: i32 = 500;

fn ensure_row(conn: &PgConnection, user_id: i32) -> Result<()> {
    diesel::insert_into(user_stats::table)
        .values(&NewUserStats { user_id })
        .on_conflict_do_nothing()
        .execute(conn)?;
    Ok(())
}

pub fn get_or_create(conn: &PgConnection, user_id: i32) -> Result<UserStats> {
    ensure_row(conn, user_id)?;
    let stats = user_stats::table
        .find(user_id)
        .get_result(conn)
        .chain_err(|| "Couldn't load the user stats.")?;
    Ok(stats)
}

#[derive(Debug, Clone, Serialize)]
pub struct XpGain {
    pub amount: i32,
    pub old_level: i32,
    pub new_level: i32,
    pub leveled_up: bool,
    pub xp: i32,
}

pub fn add_xp(conn: &PgConnection, user_id: i32, amount: i32) -> Result<XpGain> {
    if amount < 0 {
        return invalid("XP amount can't be negative");
    }

    conn.transaction(|| {
        ensure_row(conn, user_id)?;

        let (xp, old_level): (i32, i32) = diesel::update(user_stats::table.find(user_id))
            .set((user_stats::xp.eq(user_stats::xp + amount),
                  user_stats::updated_at.eq(chrono::Utc::now())))
            .returning((user_stats::xp, user_stats::level))
            .get_result(conn)?;

        let new_level = gamification::level(xp);
        if new_level != old_level {
            diesel::update(user_stats::table.find(user_id))
                .set(user_stats::level.eq(new_level))
                .execute(conn)?;
            info!("User {} reached level {}.", user_id, new_level);
        }

        Ok(XpGain {
            amount,
            old_level,
            new_level,
            leveled_up: new_level > old_level,
            xp,
        })
    })
}

/// Counts a study activity of `cards` cards on `today` towards the
/// streak and the daily goal.
pub fn record_study(conn: &PgConnection, user_id: i32, cards: i32, today: NaiveDate) -> Result<UserStats> {
    if cards < 0 {
        return invalid("card count can't be negative");
    }

    conn.transaction(|| {
        ensure_row(conn, user_id)?;

        let stats: UserStats = user_stats::table
            .find(user_id)
            .for_update()
            .get_result(conn)?;

        let streak = gamification::next_streak(stats.streak, stats.last_studied, today);
        let cards_today = gamification::advance_daily_count(stats.cards_today, stats.last_reset, today, cards);
        let last_studied = stats.last_studied.map_or(today, |last| last.max(today));

        let stats = diesel::update(user_stats::table.find(user_id))
            .set((user_stats::streak.eq(streak),
                  user_stats::longest_streak.eq(stats.longest_streak.max(streak)),
                  user_stats::last_studied.eq(Some(last_studied)),
                  user_stats::cards_today.eq(cards_today),
                  user_stats::last_reset.eq(Some(today)),
                  user_stats::updated_at.eq(chrono::Utc::now())))
            .get_result(conn)?;

        Ok(stats)
    })
}

pub fn record_review(conn: &PgConnection, user_id: i32, correct: bool) -> Result<()> {
    ensure_row(conn, user_id)?;
    diesel::update(user_stats::table.find(user_id))
        .set((user_stats::total_reviews.eq(user_stats::total_reviews + 1),
              user_stats::total_correct.eq(user_stats::total_correct + if correct { 1 } else { 0 })))
        .execute(conn)?;
    Ok(())
}

pub fn record_perfect_quiz(conn: &PgConnection, user_id: i32) -> Result<()> {
    ensure_row(conn, user_id)?;
    diesel::update(user_stats::table.find(user_id))
        .set(user_stats::perfect_quizzes.eq(user_stats::perfect_quizzes + 1))
        .execute(conn)?;
    Ok(())
}

pub fn set_daily_goal(conn: &PgConnection, user_id: i32, goal: i32) -> Result<UserStats> {
    if goal < MIN_DAILY_GOAL || goal > MAX_DAILY_GOAL {
        return invalid(format!("goal must be between {} and {}", MIN_DAILY_GOAL, MAX_DAILY_GOAL));
    }
    ensure_row(conn, user_id)?;
    let stats = diesel::update(user_stats::table.find(user_id))
        .set((user_stats::daily_goal.eq(goal),
              user_stats::updated_at.eq(chrono::Utc::now())))
        .get_result(conn)?;
    Ok(stats)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsSummary {
    pub xp: i32,
    pub level: LevelProgress,
    pub streak: i32,
    pub longest_streak: i32,
    pub last_studied: Option<NaiveDate>,
    pub daily_goal: DailyGoal,
    pub total_reviews: i32,
    pub total_correct: i32,
    pub accuracy: f64,
    pub perfect_quizzes: i32,
}

pub fn summary(stats: &UserStats, today: NaiveDate) -> StatsSummary {
    let cards_today = gamification::cards_on(stats.cards_today, stats.last_reset, today);
    let accuracy = if stats.total_reviews > 0 {
        stats.total_correct as f64 / stats.total_reviews as f64 * 100.0
    } else {
        0.0
    };

    StatsSummary {
        xp: stats.xp,
        level: gamification::level_progress(stats.xp),
        streak: gamification::current_streak(stats.streak, stats.last_studied, today),
        longest_streak: stats.longest_streak,
        last_studied: stats.last_studied,
        daily_goal: gamification::daily_goal(cards_today, stats.daily_goal),
        total_reviews: stats.total_reviews,
        total_correct: stats.total_correct,
        accuracy,
        perfect_quizzes: stats.perfect_quizzes,
    }
}
