use super::*;
use crate::schema::study_sessions;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;

pub const SESSION_KINDS: [&str; 4] = ["vocab", "lesson", "quiz", "reading"];
pub const MAX_SESSION_SECONDS: i32 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionInput {
    pub kind: String,
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_seconds: i32,
    #[serde(default)]
    pub cards_studied: i32,
    #[serde(default)]
    pub correct_count: i32,
    #[serde(default)]
    pub xp_earned: i32,
}

pub fn validate_session(input: &SessionInput, now: DateTime<Utc>) -> Result<()> {
    if !SESSION_KINDS.contains(&input.kind.as_str()) {
        return invalid(format!("kind must be one of {}", SESSION_KINDS.join(", ")));
    }
    if input.duration_seconds < 0 || input.duration_seconds > MAX_SESSION_SECONDS {
        return invalid(format!("duration_seconds must be between 0 and {}", MAX_SESSION_SECONDS));
    }
    if input.cards_studied < 0 || input.correct_count < 0 || input.xp_earned < 0 {
        return invalid("counters can't be negative");
    }
    if input.correct_count > input.cards_studied {
        return invalid("correct_count can't exceed cards_studied");
    }
    if input.started_at.map_or(false, |t| t > now + Duration::minutes(5)) {
        return invalid("started_at is in the future");
    }
    Ok(())
}

/// Logs a finished study session. The XP it reports was already granted
/// by the reviews themselves, so only the streak is touched here.
pub fn record_session(conn: &PgConnection,
                      user_id: i32,
                      input: &SessionInput,
                      today: NaiveDate,
                      now: DateTime<Utc>)
                      -> Result<StudySession> {
    validate_session(input, now)?;

    conn.transaction(|| {
        let started_at = input.started_at
            .unwrap_or_else(|| now - Duration::seconds(input.duration_seconds as i64));

        let sess: StudySession = diesel::insert_into(study_sessions::table)
            .values(&NewStudySession {
                user_id,
                kind: &input.kind,
                started_at,
                duration_seconds: input.duration_seconds,
                cards_studied: input.cards_studied,
                correct_count: input.correct_count,
                xp_earned: input.xp_earned,
            })
            .get_result(conn)?;

        stats::record_study(conn, user_id, 0, today)?;

        Ok(sess)
    })
}

pub fn recent_sessions(conn: &PgConnection, user_id: i32, limit: i64) -> Result<Vec<StudySession>> {
    let sessions = study_sessions::table
        .filter(study_sessions::user_id.eq(user_id))
        .order(study_sessions::started_at.desc())
        .limit(limit)
        .load(conn)?;
    Ok(sessions)
}
