//! Lessons, quizzes, achievements and streaks against a real PostgreSQL.
//! Skipped unless `LASHON_TEST_DATABASE_URL` is set.

mod common;

use common::test_conn;
use lashon_backend::*;
use lashon_backend::lessons::{self, LessonInput, LessonStatus, ProgressUpdate, QuestionInput,
                              QuizAnswer, QuizSubmission, StepContent, StepInput};
use lashon_backend::study::{self, SessionInput};
use chrono::{Duration, NaiveDate, TimeZone, Utc};

fn text_step(body: &str) -> StepInput {
    StepInput { title: String::new(), content: StepContent::Text { body: body.into() } }
}

fn lesson_input(slug: &str, with_quiz: bool) -> LessonInput {
    let quiz = if with_quiz {
        vec![
            QuestionInput {
                prompt: "What does אֱלֹהִים mean?".into(),
                options: vec!["God".into(), "earth".into()],
                correct_answer: "God".into(),
                explanation: None,
            },
            QuestionInput {
                prompt: "Transliterate אֶרֶץ".into(),
                options: vec![],
                correct_answer: "erets".into(),
                explanation: Some("Segolate noun.".into()),
            },
        ]
    } else {
        vec![]
    };
    LessonInput {
        slug: slug.into(),
        title: "The first verse".into(),
        description: String::new(),
        position: 1,
        xp_reward: Some(30),
        min_quiz_score: None,
        steps: vec![text_step("In the beginning"), text_step("God created")],
        quiz,
    }
}

fn submission(conn: &PgConnection, lesson_id: i32, answers: &[&str]) -> Result<QuizSubmission> {
    let questions = lessons::quiz(conn, lesson_id)?;
    Ok(QuizSubmission {
        lesson_id,
        answers: questions.iter().zip(answers)
            .map(|(q, a)| QuizAnswer { question_id: q.id, answer: a.to_string() })
            .collect(),
    })
}

#[test]
fn lesson_xp_is_paid_on_the_first_pass_only() {
    let conn = match test_conn() { Some(c) => c, None => return };
    let today = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap();

    conn.test_transaction::<_, Error, _>(|| {
        let user = user::add_user(&conn, "quiz taker", None)?;
        let lesson = lessons::create_lesson(&conn, &lesson_input("roundtrip-quiz", true))?;

        let half = submission(&conn, lesson.id, &["God", "adamah"])?;
        let failed = lessons::submit_quiz(&conn, user.id, &half, today, now)?;
        assert_eq!(failed.grade.score, 50);
        assert!(!failed.grade.passed);
        assert!(!failed.lesson_completed);
        assert_eq!(failed.xp.amount, gamification::quiz_xp(1, false));
        assert_eq!(lessons::get_progress(&conn, user.id, lesson.id)?.status, LessonStatus::InProgress);

        let full = submission(&conn, lesson.id, &[" god ", "ERETS"])?;
        let passed = lessons::submit_quiz(&conn, user.id, &full, today, now)?;
        assert_eq!(passed.grade.score, 100);
        assert!(passed.lesson_completed);
        assert_eq!(passed.best_score, Some(100));
        assert_eq!(passed.xp.amount, gamification::quiz_xp(2, true) + 30);

        let again = lessons::submit_quiz(&conn, user.id, &half, today, now)?;
        assert!(!again.lesson_completed);
        assert_eq!(again.best_score, Some(100));
        assert_eq!(again.xp.amount, gamification::quiz_xp(1, false));

        let progress = lessons::get_progress(&conn, user.id, lesson.id)?;
        assert_eq!(progress.status, LessonStatus::Completed);
        assert_eq!(progress.best_score, Some(100));
        assert_eq!(lessons::attempts(&conn, user.id, lesson.id)?.len(), 3);

        let stats = stats::get_or_create(&conn, user.id)?;
        assert_eq!(stats.perfect_quizzes, 1);
        assert_eq!(stats.streak, 1);
        Ok(())
    });
}

#[test]
fn completion_is_recorded_once_and_never_regresses() {
    let conn = match test_conn() { Some(c) => c, None => return };
    let today = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 9, 2, 9, 0, 0).unwrap();

    conn.test_transaction::<_, Error, _>(|| {
        let user = user::add_user(&conn, "lesson reader", None)?;
        let lesson = lessons::create_lesson(&conn, &lesson_input("roundtrip-reading", false))?;

        let step = ProgressUpdate { status: None, current_step: Some(1) };
        let started = lessons::update_progress(&conn, user.id, lesson.id, &step, today, now)?;
        assert_eq!(started.progress.status, LessonStatus::InProgress);
        assert_eq!(started.progress.current_step, 1);
        assert!(!started.completed_now);

        let done = ProgressUpdate { status: Some(LessonStatus::Completed), current_step: None };
        let first = lessons::update_progress(&conn, user.id, lesson.id, &done, today, now)?;
        assert!(first.completed_now);
        assert_eq!(first.xp.map(|x| x.amount), Some(30));

        let later = now + Duration::hours(1);
        let second = lessons::update_progress(&conn, user.id, lesson.id, &done, today, later)?;
        assert!(!second.completed_now);
        assert!(second.xp.is_none());

        let back = ProgressUpdate { status: Some(LessonStatus::InProgress), current_step: Some(0) };
        lessons::update_progress(&conn, user.id, lesson.id, &back, today, later)?;

        let stored = lessons::get_progress(&conn, user.id, lesson.id)?;
        assert_eq!(stored.status, LessonStatus::Completed);
        assert_eq!(stored.current_step, 1);
        assert_eq!(stored.completed_at, Some(now));
        assert_eq!(stored.started_at, Some(now));

        let out_of_range = ProgressUpdate { status: None, current_step: Some(2) };
        assert!(lessons::update_progress(&conn, user.id, lesson.id, &out_of_range, today, later).is_err());
        Ok(())
    });
}

#[test]
fn achievement_unlocks_once_with_its_reward() {
    let conn = match test_conn() { Some(c) => c, None => return };

    conn.test_transaction::<_, Error, _>(|| {
        let user = user::add_user(&conn, "achiever", None)?;
        diesel::sql_query(
            "INSERT INTO achievements (code, title, xp_reward, criteria, position) \
             VALUES ('roundtrip_xp_5', 'Five points', 40, '{\"kind\": \"xp\", \"target\": 5}', 999)")
            .execute(&conn)?;

        stats::add_xp(&conn, user.id, 5)?;
        let unlocked = achievements::check(&conn, user.id)?;
        assert_eq!(unlocked.iter().filter(|a| a.code == "roundtrip_xp_5").count(), 1);
        let xp = stats::get_or_create(&conn, user.id)?.xp;
        let rewards: i32 = unlocked.iter().map(|a| a.xp_reward).sum();
        assert_eq!(xp, 5 + rewards);

        let again = achievements::check(&conn, user.id)?;
        assert!(again.iter().all(|a| a.code != "roundtrip_xp_5"));
        assert_eq!(stats::get_or_create(&conn, user.id)?.xp, 5 + rewards);

        let listed = achievements::list(&conn, user.id)?;
        let view = listed.iter().find(|a| a.code == "roundtrip_xp_5").expect("achievement listed");
        assert!(view.unlocked);
        assert!(view.unlocked_at.is_some());
        Ok(())
    });
}

#[test]
fn streak_and_daily_goal_follow_the_calendar() {
    let conn = match test_conn() { Some(c) => c, None => return };
    let day = |d| NaiveDate::from_ymd_opt(2026, 9, d).unwrap();

    conn.test_transaction::<_, Error, _>(|| {
        let user = user::add_user(&conn, "daily student", None)?;
        stats::set_daily_goal(&conn, user.id, 6)?;

        let s = stats::record_study(&conn, user.id, 5, day(1))?;
        assert_eq!((s.streak, s.cards_today), (1, 5));
        let s = stats::record_study(&conn, user.id, 3, day(1))?;
        assert_eq!((s.streak, s.cards_today), (1, 8));
        assert!(stats::summary(&s, day(1)).daily_goal.complete);

        let s = stats::record_study(&conn, user.id, 2, day(2))?;
        assert_eq!((s.streak, s.longest_streak, s.cards_today), (2, 2, 2));
        assert!(!stats::summary(&s, day(2)).daily_goal.complete);

        let s = stats::record_study(&conn, user.id, 1, day(5))?;
        assert_eq!((s.streak, s.longest_streak), (1, 2));

        let summary = stats::summary(&s, day(7));
        assert_eq!(summary.streak, 0);
        assert_eq!(summary.longest_streak, 2);
        assert_eq!(summary.daily_goal.cards_today, 0);
        Ok(())
    });
}

#[test]
fn study_session_only_touches_the_streak() {
    let conn = match test_conn() { Some(c) => c, None => return };
    let today = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 9, 3, 20, 0, 0).unwrap();

    conn.test_transaction::<_, Error, _>(|| {
        let user = user::add_user(&conn, "session logger", None)?;
        let input = SessionInput {
            kind: "vocab".into(),
            started_at: None,
            duration_seconds: 600,
            cards_studied: 20,
            correct_count: 17,
            xp_earned: 174,
        };

        let recorded = study::record_session(&conn, user.id, &input, today, now)?;
        assert_eq!(recorded.started_at, now - Duration::seconds(600));

        let stats = stats::get_or_create(&conn, user.id)?;
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.cards_today, 0);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_studied, Some(today));

        let recent = study::recent_sessions(&conn, user.id, 10)?;
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].xp_earned, 174);
        Ok(())
    });
}
