use super::schema::*;
use chrono::{DateTime, NaiveDate, offset::Utc};
use serde::{Serialize, Deserialize};
use serde_json::Value;

#[derive(Identifiable, Clone, Queryable, Debug, AsChangeset, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub joined: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name="users"]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize)]
#[table_name="user_groups"]
pub struct UserGroup {
    pub id: i32,
    pub group_name: String,
}

#[derive(Insertable)]
#[table_name="user_groups"]
pub struct NewUserGroup<'a> {
    pub group_name: &'a str,
}

#[derive(Identifiable, Queryable, Debug, Insertable, Associations)]
#[table_name="group_memberships"]
#[primary_key(user_id, group_id)]
#[belongs_to(UserGroup, foreign_key = "group_id")]
#[belongs_to(User, foreign_key = "user_id")]
pub struct GroupMembership {
    pub user_id: i32,
    pub group_id: i32,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations)]
#[table_name="sessions"]
#[belongs_to(User, foreign_key = "user_id")]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub started: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[table_name="sessions"]
pub struct NewSession<'a> {
    pub user_id: i32,
    pub token: &'a str,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[table_name="vocab_sets"]
pub struct VocabSet {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[table_name="vocab_sets"]
pub struct NewVocabSet<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub position: i32,
}

#[derive(AsChangeset, Deserialize, Debug, Default, Clone)]
#[table_name="vocab_sets"]
pub struct UpdateVocabSet {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

#[derive(QueryableByName, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VocabSetSummary {
    #[sql_type = "diesel::sql_types::Int4"]
    pub id: i32,
    #[sql_type = "diesel::sql_types::Varchar"]
    pub name: String,
    #[sql_type = "diesel::sql_types::Text"]
    pub description: String,
    #[sql_type = "diesel::sql_types::Int4"]
    pub position: i32,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub word_count: i64,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations, Serialize, PartialEq)]
#[table_name="vocab_words"]
#[belongs_to(VocabSet, foreign_key = "set_id")]
pub struct VocabWord {
    pub id: i32,
    pub set_id: i32,
    pub position: i32,
    pub hebrew: String,
    #[serde(skip_serializing)]
    pub search_key: String,
    pub transliteration: String,
    pub gloss: String,
    pub part_of_speech: Option<String>,
    pub gender: Option<String>,
    pub strongs: Option<String>,
    pub frequency: Option<i32>,
}

#[derive(Insertable, Debug)]
#[table_name="vocab_words"]
pub struct NewVocabWord<'a> {
    pub set_id: i32,
    pub position: i32,
    pub hebrew: &'a str,
    pub search_key: &'a str,
    pub transliteration: &'a str,
    pub gloss: &'a str,
    pub part_of_speech: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub strongs: Option<&'a str>,
    pub frequency: Option<i32>,
}

#[derive(Identifiable, Queryable, Insertable, AsChangeset, Debug, Clone, Serialize)]
#[table_name="user_progress"]
#[primary_key(user_id, word_id)]
#[changeset_options(treat_none_as_null = "true")]
pub struct UserProgress {
    pub user_id: i32,
    pub word_id: i32,
    pub level: i32,
    pub next_review: DateTime<Utc>,
    pub last_review: Option<DateTime<Utc>>,
    pub review_count: i32,
    pub correct_count: i32,
}

#[derive(Queryable, Debug, Clone)]
pub struct CardReview {
    pub id: i32,
    pub user_id: i32,
    pub word_id: i32,
    pub review_key: Option<String>,
    pub correct: bool,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[table_name="card_reviews"]
pub struct NewCardReview<'a> {
    pub user_id: i32,
    pub word_id: i32,
    pub review_key: Option<&'a str>,
    pub correct: bool,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize, PartialEq)]
#[table_name="user_stats"]
#[primary_key(user_id)]
pub struct UserStats {
    pub user_id: i32,
    pub xp: i32,
    pub level: i32,
    pub streak: i32,
    pub longest_streak: i32,
    pub last_studied: Option<NaiveDate>,
    pub daily_goal: i32,
    pub cards_today: i32,
    pub last_reset: Option<NaiveDate>,
    pub total_reviews: i32,
    pub total_correct: i32,
    pub perfect_quizzes: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name="user_stats"]
pub struct NewUserStats {
    pub user_id: i32,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize)]
#[table_name="lessons"]
pub struct Lesson {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub position: i32,
    pub xp_reward: i32,
    pub min_quiz_score: i32,
    pub published: bool,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations)]
#[table_name="lesson_steps"]
#[belongs_to(Lesson, foreign_key = "lesson_id")]
pub struct LessonStep {
    pub id: i32,
    pub lesson_id: i32,
    pub position: i32,
    pub title: String,
    pub content: Value,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations)]
#[table_name="quiz_questions"]
#[belongs_to(Lesson, foreign_key = "lesson_id")]
pub struct QuizQuestion {
    pub id: i32,
    pub lesson_id: i32,
    pub position: i32,
    pub prompt: String,
    pub options: Value,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Identifiable, Queryable, Insertable, AsChangeset, Debug, Clone, Serialize)]
#[table_name="user_lesson_progress"]
#[primary_key(user_id, lesson_id)]
#[changeset_options(treat_none_as_null = "true")]
pub struct LessonProgress {
    pub user_id: i32,
    pub lesson_id: i32,
    pub status: String,
    pub current_step: i32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub best_score: Option<i32>,
}

#[derive(Queryable, Debug, Clone, Serialize)]
pub struct QuizAttempt {
    pub id: i32,
    pub user_id: i32,
    pub lesson_id: i32,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub xp_awarded: i32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[table_name="quiz_attempts"]
pub struct NewQuizAttempt {
    pub user_id: i32,
    pub lesson_id: i32,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub xp_awarded: i32,
}

#[derive(Identifiable, Queryable, Debug, Clone)]
#[table_name="achievements"]
pub struct Achievement {
    pub id: i32,
    pub code: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub xp_reward: i32,
    pub criteria: Value,
    pub position: i32,
}

#[derive(Identifiable, Queryable, Insertable, AsChangeset, Debug, Clone, Serialize)]
#[table_name="achievement_progress"]
#[primary_key(user_id, achievement_id)]
#[changeset_options(treat_none_as_null = "true")]
pub struct AchievementProgress {
    pub user_id: i32,
    pub achievement_id: i32,
    pub progress: i32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize)]
#[table_name="study_sessions"]
pub struct StudySession {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: i32,
    pub cards_studied: i32,
    pub correct_count: i32,
    pub xp_earned: i32,
}

#[derive(Insertable, Debug)]
#[table_name="study_sessions"]
pub struct NewStudySession<'a> {
    pub user_id: i32,
    pub kind: &'a str,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: i32,
    pub cards_studied: i32,
    pub correct_count: i32,
    pub xp_earned: i32,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize)]
#[table_name="bible_books"]
pub struct BibleBook {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub hebrew_name: String,
    pub chapters: i32,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations, Serialize)]
#[table_name="bible_verses"]
#[belongs_to(BibleBook, foreign_key = "book_id")]
pub struct BibleVerse {
    pub id: i32,
    pub book_id: i32,
    pub chapter: i32,
    pub verse: i32,
    pub hebrew: String,
    pub translation: Option<String>,
}

#[derive(Identifiable, Queryable, Debug, Clone, Associations, Serialize)]
#[table_name="bible_words"]
#[belongs_to(BibleVerse, foreign_key = "verse_id")]
pub struct BibleWord {
    pub id: i32,
    pub verse_id: i32,
    pub position: i32,
    pub hebrew: String,
    pub transliteration: Option<String>,
    pub strongs: Option<String>,
    pub morphology: Option<String>,
    pub gloss: Option<String>,
}

#[derive(Identifiable, Queryable, Debug, Clone, Serialize)]
#[table_name="strongs_hebrew"]
#[primary_key(number)]
pub struct StrongsEntry {
    pub number: String,
    pub lemma: String,
    pub transliteration: Option<String>,
    pub pronunciation: Option<String>,
    pub definition: String,
    pub kjv_usage: Option<String>,
}
