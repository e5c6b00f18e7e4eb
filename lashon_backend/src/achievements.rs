use super::*;
use crate::schema::{achievements, achievement_progress, user_progress, user_lesson_progress};
use crate::lessons::LessonStatus;
use serde::{Serialize, Deserialize};

/// What an achievement measures, stored as the `criteria` JSON column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criteria {
    Xp { target: i32 },
    Level { target: i32 },
    Streak { target: i32 },
    WordsLearned { target: i32 },
    WordsMastered { target: i32 },
    LessonsCompleted { target: i32 },
    PerfectQuizzes { target: i32 },
    CardsReviewed { target: i32 },
}

impl Criteria {
    pub fn target(&self) -> i32 {
        use self::Criteria::*;
        match *self {
            Xp { target } | Level { target } | Streak { target } | WordsLearned { target }
            | WordsMastered { target } | LessonsCompleted { target } | PerfectQuizzes { target }
            | CardsReviewed { target } => target,
        }
    }

    fn measure(&self, snap: &Snapshot) -> i64 {
        use self::Criteria::*;
        match *self {
            Xp { .. } => snap.xp as i64,
            Level { .. } => snap.level as i64,
            Streak { .. } => snap.streak as i64,
            WordsLearned { .. } => snap.words_learned,
            WordsMastered { .. } => snap.words_mastered,
            LessonsCompleted { .. } => snap.lessons_completed,
            PerfectQuizzes { .. } => snap.perfect_quizzes as i64,
            CardsReviewed { .. } => snap.cards_reviewed as i64,
        }
    }
}

/// The user's numbers that achievements are judged against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub xp: i32,
    pub level: i32,
    pub streak: i32,
    pub words_learned: i64,
    pub words_mastered: i64,
    pub lessons_completed: i64,
    pub perfect_quizzes: i32,
    pub cards_reviewed: i32,
}

/// Progress towards the target, capped at it, and whether it's reached.
pub fn evaluate(criteria: &Criteria, snap: &Snapshot) -> (i32, bool) {
    let target = criteria.target().max(0);
    let value = criteria.measure(snap).max(0);
    let progress = value.min(target as i64) as i32;
    (progress, value >= target as i64)
}

pub fn parse_criteria(achievement: &Achievement) -> Result<Criteria> {
    serde_json::from_value(achievement.criteria.clone())
        .chain_err(|| ErrorKind::DatabaseOdd("Malformed achievement criteria."))
}

pub fn snapshot(conn: &PgConnection, user_id: i32) -> Result<Snapshot> {
    let stats = stats::get_or_create(conn, user_id)?;

    let words_learned: i64 = user_progress::table
        .filter(user_progress::user_id.eq(user_id))
        .filter(user_progress::level.ge(srs::LEARNED_LEVEL))
        .count()
        .get_result(conn)?;

    let words_mastered: i64 = user_progress::table
        .filter(user_progress::user_id.eq(user_id))
        .filter(user_progress::level.ge(srs::MASTERED_LEVEL))
        .count()
        .get_result(conn)?;

    let lessons_completed: i64 = user_lesson_progress::table
        .filter(user_lesson_progress::user_id.eq(user_id))
        .filter(user_lesson_progress::status.eq(LessonStatus::Completed.as_str()))
        .count()
        .get_result(conn)?;

    Ok(Snapshot {
        xp: stats.xp,
        level: stats.level,
        streak: stats.streak.max(stats.longest_streak),
        words_learned,
        words_mastered,
        lessons_completed,
        perfect_quizzes: stats.perfect_quizzes,
        cards_reviewed: stats.total_reviews,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Unlocked {
    pub id: i32,
    pub code: String,
    pub title: String,
    pub xp_reward: i32,
}

fn check_once(conn: &PgConnection, user_id: i32) -> Result<Vec<Achievement>> {
    let snap = snapshot(conn, user_id)?;
    let catalog: Vec<Achievement> = achievements::table
        .order(achievements::position)
        .load(conn)?;

    let mut newly_unlocked = vec![];
    for achievement in catalog {
        let criteria = parse_criteria(&achievement)?;
        let (progress, done) = evaluate(&criteria, &snap);

        diesel::insert_into(achievement_progress::table)
            .values(&AchievementProgress {
                user_id,
                achievement_id: achievement.id,
                progress: 0,
                unlocked: false,
                unlocked_at: None,
            })
            .on_conflict_do_nothing()
            .execute(conn)?;

        let still_locked = achievement_progress::table
            .filter(achievement_progress::user_id.eq(user_id))
            .filter(achievement_progress::achievement_id.eq(achievement.id))
            .filter(achievement_progress::unlocked.eq(false));

        // The unlocked filter makes exactly one concurrent request win the flip.
        let updated = diesel::update(still_locked)
            .set((achievement_progress::progress.eq(progress),
                  achievement_progress::unlocked.eq(done),
                  achievement_progress::unlocked_at.eq(if done { Some(chrono::Utc::now()) } else { None })))
            .execute(conn)?;

        if done && updated == 1 {
            info!("User {} unlocked achievement {:?}.", user_id, achievement.code);
            newly_unlocked.push(achievement);
        }
    }
    Ok(newly_unlocked)
}

/// Re-evaluates every achievement for the user and grants the XP of the
/// newly unlocked ones. XP rewards can unlock further achievements, so
/// this runs until nothing changes.
pub fn check(conn: &PgConnection, user_id: i32) -> Result<Vec<Unlocked>> {
    conn.transaction(|| {
        let mut all = vec![];
        loop {
            let newly = check_once(conn, user_id)?;
            if newly.is_empty() {
                break;
            }
            for a in newly {
                if a.xp_reward > 0 {
                    stats::add_xp(conn, user_id, a.xp_reward)?;
                }
                all.push(Unlocked { id: a.id, code: a.code, title: a.title, xp_reward: a.xp_reward });
            }
        }
        Ok(all)
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub id: i32,
    pub code: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub xp_reward: i32,
    pub criteria: Criteria,
    pub target: i32,
    pub progress: i32,
    pub unlocked: bool,
    pub unlocked_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub fn list(conn: &PgConnection, user_id: i32) -> Result<Vec<AchievementView>> {
    let snap = snapshot(conn, user_id)?;
    let rows: Vec<(Achievement, Option<AchievementProgress>)> = achievements::table
        .left_outer_join(achievement_progress::table.on(
            achievement_progress::achievement_id.eq(achievements::id)
                .and(achievement_progress::user_id.eq(user_id))))
        .order(achievements::position)
        .load(conn)?;

    rows.into_iter().map(|(a, p)| {
        let criteria = parse_criteria(&a)?;
        let (live_progress, _) = evaluate(&criteria, &snap);
        let (progress, unlocked, unlocked_at) = match p {
            Some(ref p) if p.unlocked => (criteria.target(), true, p.unlocked_at),
            _ => (live_progress, false, None),
        };
        Ok(AchievementView {
            id: a.id,
            code: a.code,
            title: a.title,
            description: a.description,
            icon: a.icon,
            xp_reward: a.xp_reward,
            target: criteria.target(),
            criteria,
            progress,
            unlocked,
            unlocked_at,
        })
    }).collect()
}
