use super::*;
use crate::schema::{lessons, lesson_steps, quiz_questions, quiz_attempts, user_lesson_progress, vocab_words};
use crate::achievements::Unlocked;
use crate::stats::XpGain;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Deserialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LessonStatus::NotStarted => "not_started",
            LessonStatus::InProgress => "in_progress",
            LessonStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<LessonStatus> {
        Ok(match s {
            "not_started" => LessonStatus::NotStarted,
            "in_progress" => LessonStatus::InProgress,
            "completed" => LessonStatus::Completed,
            _ => return invalid(format!("{:?} is not a lesson status", s)),
        })
    }
}

/// Content of one lesson step, stored in the `content` JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepContent {
    Text {
        body: String,
    },
    Vocabulary {
        word_ids: Vec<i32>,
        intro: Option<String>,
    },
    Example {
        hebrew: String,
        transliteration: Option<String>,
        translation: String,
        reference: Option<String>,
    },
    Letter {
        letter: String,
        name: String,
        sound: String,
        notes: Option<String>,
    },
    Audio {
        url: String,
        caption: Option<String>,
    },
}

fn parse_step(step: LessonStep) -> Result<StepView> {
    let content = serde_json::from_value(step.content)
        .chain_err(|| ErrorKind::DatabaseOdd("Malformed lesson step content."))?;
    Ok(StepView { id: step.id, position: step.position, title: step.title, content })
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: i32,
    pub position: i32,
    pub title: String,
    pub content: StepContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonSummary {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub position: i32,
    pub xp_reward: i32,
    pub step_count: i64,
    pub status: LessonStatus,
    pub best_score: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonDetail {
    pub lesson: Lesson,
    pub steps: Vec<StepView>,
    pub words: Vec<VocabWord>,
    pub has_quiz: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressView {
    pub lesson_id: i32,
    pub status: LessonStatus,
    pub current_step: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub best_score: Option<i32>,
}

impl ProgressView {
    fn from_row(row: &LessonProgress) -> Result<ProgressView> {
        Ok(ProgressView {
            lesson_id: row.lesson_id,
            status: row.status.parse()
                .chain_err(|| ErrorKind::DatabaseOdd("Unknown lesson status in the DB."))?,
            current_step: row.current_step,
            started_at: row.started_at,
            completed_at: row.completed_at,
            best_score: row.best_score,
        })
    }
}

fn load_lesson(conn: &PgConnection, lesson_id: i32) -> Result<Lesson> {
    let lesson = lessons::table
        .find(lesson_id)
        .filter(lessons::published.eq(true))
        .get_result(conn)
        .optional()?;
    Ok(try_or!(lesson, else bail!(ErrorKind::NotFound("Lesson"))))
}

fn step_count(conn: &PgConnection, lesson_id: i32) -> Result<i64> {
    let count = lesson_steps::table
        .filter(lesson_steps::lesson_id.eq(lesson_id))
        .count()
        .get_result(conn)?;
    Ok(count)
}

pub fn list(conn: &PgConnection, user_id: i32) -> Result<Vec<LessonSummary>> {
    let rows: Vec<(Lesson, Option<LessonProgress>)> = lessons::table
        .left_outer_join(user_lesson_progress::table.on(
            user_lesson_progress::lesson_id.eq(lessons::id)
                .and(user_lesson_progress::user_id.eq(user_id))))
        .filter(lessons::published.eq(true))
        .order((lessons::position, lessons::id))
        .load(conn)?;

    let mut step_counts: HashMap<i32, i64> = HashMap::new();
    for lesson_id in lesson_steps::table.select(lesson_steps::lesson_id).load::<i32>(conn)? {
        *step_counts.entry(lesson_id).or_insert(0) += 1;
    }

    rows.into_iter().map(|(lesson, progress)| {
        let progress = progress.as_ref().map(ProgressView::from_row).transpose()?;
        Ok(LessonSummary {
            step_count: step_counts.get(&lesson.id).cloned().unwrap_or(0),
            status: progress.as_ref().map_or(LessonStatus::NotStarted, |p| p.status),
            best_score: progress.and_then(|p| p.best_score),
            id: lesson.id,
            slug: lesson.slug,
            title: lesson.title,
            description: lesson.description,
            position: lesson.position,
            xp_reward: lesson.xp_reward,
        })
    }).collect()
}

pub fn get(conn: &PgConnection, lesson_id: i32) -> Result<LessonDetail> {
    let lesson = load_lesson(conn, lesson_id)?;

    let steps = LessonStep::belonging_to(&lesson)
        .order(lesson_steps::position)
        .load::<LessonStep>(conn)?
        .into_iter()
        .map(parse_step)
        .collect::<Result<Vec<_>>>()?;

    let word_ids: Vec<i32> = steps.iter()
        .filter_map(|s| match s.content {
            StepContent::Vocabulary { ref word_ids, .. } => Some(word_ids.iter().cloned()),
            _ => None,
        })
        .flatten()
        .collect();

    let words = if word_ids.is_empty() {
        vec![]
    } else {
        vocab_words::table
            .filter(vocab_words::id.eq_any(&word_ids))
            .order((vocab_words::set_id, vocab_words::position))
            .load(conn)?
    };

    let quiz_count: i64 = QuizQuestion::belonging_to(&lesson).count().get_result(conn)?;

    Ok(LessonDetail { lesson, steps, words, has_quiz: quiz_count > 0 })
}

fn not_started(user_id: i32, lesson_id: i32) -> LessonProgress {
    LessonProgress {
        user_id,
        lesson_id,
        status: LessonStatus::NotStarted.as_str().to_string(),
        current_step: 0,
        started_at: None,
        completed_at: None,
        best_score: None,
    }
}

pub fn get_progress(conn: &PgConnection, user_id: i32, lesson_id: i32) -> Result<ProgressView> {
    load_lesson(conn, lesson_id)?;
    let row: Option<LessonProgress> = user_lesson_progress::table
        .find((user_id, lesson_id))
        .get_result(conn)
        .optional()?;

    ProgressView::from_row(&row.unwrap_or_else(|| not_started(user_id, lesson_id)))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdate {
    pub status: Option<LessonStatus>,
    pub current_step: Option<i32>,
}

/// Applies an update to a progress row. Status only moves forward; the
/// returned flag is set when this update is the first completion.
pub fn apply_update(row: &LessonProgress,
                    update: &ProgressUpdate,
                    step_count: i64,
                    now: DateTime<Utc>)
                    -> Result<(LessonProgress, bool)> {
    let current: LessonStatus = row.status.parse()?;

    if let Some(step) = update.current_step {
        let in_range = step >= 0 && (step as i64) < step_count.max(1);
        if !in_range {
            return invalid(format!("current_step must be between 0 and {}", (step_count - 1).max(0)));
        }
    }

    let requested = match (update.status, update.current_step) {
        (Some(status), _) => status,
        (None, Some(_)) => LessonStatus::InProgress,
        (None, None) => current,
    };
    let status = current.max(requested);

    let mut next = row.clone();
    next.status = status.as_str().to_string();
    if let Some(step) = update.current_step {
        if current != LessonStatus::Completed {
            next.current_step = step;
        }
    }
    if status >= LessonStatus::InProgress && next.started_at.is_none() {
        next.started_at = Some(now);
    }
    let completed_now = status == LessonStatus::Completed && current != LessonStatus::Completed;
    if completed_now {
        next.completed_at = Some(now);
    }

    Ok((next, completed_now))
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressOutcome {
    pub progress: ProgressView,
    pub completed_now: bool,
    pub xp: Option<XpGain>,
    pub achievements: Vec<Unlocked>,
}

fn lock_progress(conn: &PgConnection, user_id: i32, lesson_id: i32) -> Result<LessonProgress> {
    diesel::insert_into(user_lesson_progress::table)
        .values(&not_started(user_id, lesson_id))
        .on_conflict_do_nothing()
        .execute(conn)?;

    let row = user_lesson_progress::table
        .find((user_id, lesson_id))
        .for_update()
        .get_result(conn)?;
    Ok(row)
}

fn save_progress(conn: &PgConnection, row: &LessonProgress) -> Result<LessonProgress> {
    let saved = diesel::update(user_lesson_progress::table.find((row.user_id, row.lesson_id)))
        .set(row)
        .get_result(conn)?;
    Ok(saved)
}

pub fn update_progress(conn: &PgConnection,
                       user_id: i32,
                       lesson_id: i32,
                       update: &ProgressUpdate,
                       today: NaiveDate,
                       now: DateTime<Utc>)
                       -> Result<ProgressOutcome> {
    conn.transaction(|| {
        let lesson = load_lesson(conn, lesson_id)?;
        let steps = step_count(conn, lesson_id)?;
        let row = lock_progress(conn, user_id, lesson_id)?;

        let (next, completed_now) = apply_update(&row, update, steps, now)?;
        let saved = save_progress(conn, &next)?;

        let mut xp = None;
        let mut unlocked = vec![];
        if completed_now {
            info!("User {} completed lesson {:?}.", user_id, lesson.slug);
            xp = Some(stats::add_xp(conn, user_id, lesson.xp_reward)?);
            stats::record_study(conn, user_id, 0, today)?;
            unlocked = achievements::check(conn, user_id)?;
        }

        Ok(ProgressOutcome {
            progress: ProgressView::from_row(&saved)?,
            completed_now,
            xp,
            achievements: unlocked,
        })
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: i32,
    pub position: i32,
    pub prompt: String,
    pub options: Vec<String>,
}

fn options_of(question: &QuizQuestion) -> Result<Vec<String>> {
    serde_json::from_value(question.options.clone())
        .chain_err(|| ErrorKind::DatabaseOdd("Malformed quiz question options."))
}

fn load_questions(conn: &PgConnection, lesson: &Lesson) -> Result<Vec<QuizQuestion>> {
    let questions = QuizQuestion::belonging_to(lesson)
        .order((quiz_questions::position, quiz_questions::id))
        .load(conn)?;
    Ok(questions)
}

/// Questions without their answers.
pub fn quiz(conn: &PgConnection, lesson_id: i32) -> Result<Vec<QuestionView>> {
    let lesson = load_lesson(conn, lesson_id)?;
    load_questions(conn, &lesson)?
        .iter()
        .map(|q| Ok(QuestionView {
            id: q.id,
            position: q.position,
            prompt: q.prompt.clone(),
            options: options_of(q)?,
        }))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizAnswer {
    pub question_id: i32,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmission {
    pub lesson_id: i32,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuestionResult {
    pub question_id: i32,
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Grade {
    pub correct_answers: i32,
    pub total_questions: i32,
    pub score: i32,
    pub passed: bool,
    pub xp_awarded: i32,
    pub results: Vec<QuestionResult>,
}

/// Answers match when they agree after trimming, case folding and
/// stripping Hebrew points.
pub fn answers_match(given: &str, expected: &str) -> bool {
    let norm = |s: &str| hebrew::search_key(s.trim()).to_lowercase();
    norm(given) == norm(expected)
}

/// Grades a submission. Unanswered questions count as wrong.
pub fn grade(questions: &[QuizQuestion], answers: &[QuizAnswer], min_score: i32) -> Result<Grade> {
    if questions.is_empty() {
        return invalid("this lesson has no quiz");
    }

    let mut given: HashMap<i32, &str> = HashMap::new();
    let known: HashSet<i32> = questions.iter().map(|q| q.id).collect();
    for a in answers {
        if !known.contains(&a.question_id) {
            return invalid(format!("question {} doesn't belong to this quiz", a.question_id));
        }
        if given.insert(a.question_id, a.answer.as_str()).is_some() {
            return invalid(format!("question {} was answered twice", a.question_id));
        }
    }

    let results: Vec<QuestionResult> = questions.iter()
        .map(|q| QuestionResult {
            question_id: q.id,
            correct: given.get(&q.id).map_or(false, |a| answers_match(a, &q.correct_answer)),
            correct_answer: q.correct_answer.clone(),
            explanation: q.explanation.clone(),
        })
        .collect();

    let correct_answers = results.iter().filter(|r| r.correct).count() as i32;
    let total_questions = questions.len() as i32;
    let score = gamification::quiz_score(correct_answers, total_questions);
    let passed = gamification::quiz_passed(score, min_score);

    Ok(Grade {
        correct_answers,
        total_questions,
        score,
        passed,
        xp_awarded: gamification::quiz_xp(correct_answers, passed),
        results,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    #[serde(flatten)]
    pub grade: Grade,
    pub best_score: Option<i32>,
    pub lesson_completed: bool,
    pub xp: XpGain,
    pub achievements: Vec<Unlocked>,
}

pub fn submit_quiz(conn: &PgConnection,
                   user_id: i32,
                   submission: &QuizSubmission,
                   today: NaiveDate,
                   now: DateTime<Utc>)
                   -> Result<QuizOutcome> {
    conn.transaction(|| {
        let lesson = load_lesson(conn, submission.lesson_id)?;
        let questions = load_questions(conn, &lesson)?;
        let grade = grade(&questions, &submission.answers, lesson.min_quiz_score)?;

        diesel::insert_into(quiz_attempts::table)
            .values(&NewQuizAttempt {
                user_id,
                lesson_id: lesson.id,
                score: grade.score,
                correct_answers: grade.correct_answers,
                total_questions: grade.total_questions,
                passed: grade.passed,
                xp_awarded: grade.xp_awarded,
            })
            .execute(conn)?;

        let row = lock_progress(conn, user_id, lesson.id)?;
        let update = ProgressUpdate {
            status: Some(if grade.passed { LessonStatus::Completed } else { LessonStatus::InProgress }),
            current_step: None,
        };
        let (mut next, completed_now) = apply_update(&row, &update, step_count(conn, lesson.id)?, now)?;
        next.best_score = Some(row.best_score.map_or(grade.score, |best| best.max(grade.score)));
        let saved = save_progress(conn, &next)?;

        if grade.score == 100 {
            stats::record_perfect_quiz(conn, user_id)?;
        }
        let mut xp_total = grade.xp_awarded;
        if completed_now {
            info!("User {} completed lesson {:?} by passing its quiz.", user_id, lesson.slug);
            xp_total += lesson.xp_reward;
        }
        let xp = stats::add_xp(conn, user_id, xp_total)?;
        stats::record_study(conn, user_id, 0, today)?;
        let unlocked = achievements::check(conn, user_id)?;

        Ok(QuizOutcome {
            best_score: saved.best_score,
            lesson_completed: completed_now,
            grade,
            xp,
            achievements: unlocked,
        })
    })
}

pub fn attempts(conn: &PgConnection, user_id: i32, lesson_id: i32) -> Result<Vec<QuizAttempt>> {
    let attempts = quiz_attempts::table
        .filter(quiz_attempts::user_id.eq(user_id))
        .filter(quiz_attempts::lesson_id.eq(lesson_id))
        .order(quiz_attempts::submitted_at.desc())
        .load(conn)?;
    Ok(attempts)
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepInput {
    #[serde(default)]
    pub title: String,
    pub content: StepContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonInput {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: i32,
    pub xp_reward: Option<i32>,
    pub min_quiz_score: Option<i32>,
    #[serde(default)]
    pub steps: Vec<StepInput>,
    #[serde(default)]
    pub quiz: Vec<QuestionInput>,
}

#[derive(Insertable)]
#[table_name="lessons"]
struct NewLesson<'a> {
    slug: &'a str,
    title: &'a str,
    description: &'a str,
    position: i32,
    xp_reward: i32,
    min_quiz_score: i32,
}

#[derive(Insertable)]
#[table_name="lesson_steps"]
struct NewLessonStep<'a> {
    lesson_id: i32,
    position: i32,
    title: &'a str,
    content: serde_json::Value,
}

#[derive(Insertable)]
#[table_name="quiz_questions"]
struct NewQuizQuestion<'a> {
    lesson_id: i32,
    position: i32,
    prompt: &'a str,
    options: serde_json::Value,
    correct_answer: &'a str,
    explanation: Option<&'a str>,
}

pub fn validate_lesson(input: &LessonInput) -> Result<()> {
    if input.slug.trim().is_empty() || input.title.trim().is_empty() {
        return invalid("lesson slug and title can't be empty");
    }
    if let Some(score) = input.min_quiz_score {
        if score < 0 || score > 100 {
            return invalid("min_quiz_score must be between 0 and 100");
        }
    }
    if input.xp_reward.map_or(false, |xp| xp < 0) {
        return invalid("xp_reward can't be negative");
    }
    for (i, q) in input.quiz.iter().enumerate() {
        if q.prompt.trim().is_empty() || q.correct_answer.trim().is_empty() {
            return invalid(format!("quiz question {} needs a prompt and an answer", i + 1));
        }
        if !q.options.is_empty() && !q.options.iter().any(|o| answers_match(o, &q.correct_answer)) {
            return invalid(format!("quiz question {}: the answer isn't among the options", i + 1));
        }
    }
    Ok(())
}

/// Stores a lesson with its steps and quiz. Used by the curriculum loader.
pub fn create_lesson(conn: &PgConnection, input: &LessonInput) -> Result<Lesson> {
    validate_lesson(input)?;

    conn.transaction(|| {
        let lesson: Lesson = diesel::insert_into(lessons::table)
            .values(&NewLesson {
                slug: input.slug.trim(),
                title: input.title.trim(),
                description: &input.description,
                position: input.position,
                xp_reward: input.xp_reward.unwrap_or(50),
                min_quiz_score: input.min_quiz_score.unwrap_or(70),
            })
            .get_result(conn)
            .chain_err(|| "Couldn't insert the lesson.")?;

        for (i, step) in input.steps.iter().enumerate() {
            diesel::insert_into(lesson_steps::table)
                .values(&NewLessonStep {
                    lesson_id: lesson.id,
                    position: i as i32,
                    title: &step.title,
                    content: serde_json::to_value(&step.content)?,
                })
                .execute(conn)?;
        }

        for (i, q) in input.quiz.iter().enumerate() {
            diesel::insert_into(quiz_questions::table)
                .values(&NewQuizQuestion {
                    lesson_id: lesson.id,
                    position: i as i32,
                    prompt: &q.prompt,
                    options: serde_json::to_value(&q.options)?,
                    correct_answer: &q.correct_answer,
                    explanation: q.explanation.as_ref().map(String::as_str),
                })
                .execute(conn)?;
        }

        info!("Created lesson {:?} with {} steps and {} quiz questions.",
              lesson.slug, input.steps.len(), input.quiz.len());
        Ok(lesson)
    })
}
