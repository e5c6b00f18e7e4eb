use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use lashon_backend::models::{QuizAttempt, StudySession, VocabSetSummary, VocabWord, BibleBook};
use lashon_backend::achievements::{self, AchievementView};
use lashon_backend::bible::{self, Chapter, StrongsView};
use lashon_backend::lessons::{self, LessonDetail, LessonSummary, ProgressOutcome, ProgressUpdate,
                              ProgressView, QuestionView, QuizOutcome, QuizSubmission};
use lashon_backend::stats::{self, StatsSummary, XpGain};
use lashon_backend::study::{self, SessionInput};
use lashon_backend::vocab::{self, CardOutcome, CardResult, ProgressEdit, ProgressOverview,
                            ReviewQueue, SetDetail};
use lashon_backend::errors::invalid;
use lashon_backend::{clamp_limit, now, session, today};

use crate::helpers::*;

pub const MAX_XP_GRANT: i32 = 1000;

pub fn routes() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/logout", post(logout))
        .route("/api/stats", get(get_stats))
        .route("/api/stats/daily-goal", post(set_daily_goal))
        .route("/api/xp/add", post(add_xp))
        .route("/api/vocab/sets", get(list_sets))
        .route("/api/vocab/sets/{id}", get(get_set))
        .route("/api/vocab/search", get(search_words))
        .route("/api/vocab/review", get(review_queue))
        .route("/api/vocab/card-result", post(card_result))
        .route("/api/progress", get(progress_overview))
        .route("/api/progress/bulk-update", post(bulk_update))
        .route("/api/progress/reset", post(reset_progress))
        .route("/api/lessons", get(list_lessons))
        .route("/api/lessons/{id}", get(get_lesson))
        .route("/api/lessons/{id}/progress", get(get_lesson_progress).post(update_lesson_progress))
        .route("/api/lessons/{id}/quiz", get(get_quiz))
        .route("/api/lessons/{id}/attempts", get(quiz_attempts))
        .route("/api/quiz/submit", post(submit_quiz))
        .route("/api/achievements", get(list_achievements))
        .route("/api/study-sessions", get(recent_sessions).post(record_session))
        .route("/api/bible/books", get(bible_books))
        .route("/api/bible/{book}/{chapter}", get(bible_chapter))
        .route("/api/strongs/{number}", get(strongs_entry))
}

pub async fn health() -> Json<Value> {
    let (build, commit, release) = get_version_info();
    Json(json!({
        "status": "ok",
        "build_number": build,
        "commit": commit,
        "release": release,
    }))
}

pub async fn logout(headers: HeaderMap) -> ApiResult<Response> {
    let token = match session_token(&headers) {
        Some(token) => token,
        None => return Err(ApiError::unauthorized()),
    };
    debug!("Logging out.");
    with_conn(move |conn| session::end(conn, &token)).await?;

    let mut resp = Json(json!({ "logged_out": true })).into_response();
    let value = HeaderValue::from_str(&expired_session_cookie().to_string()).err_500()?;
    resp.headers_mut().insert(header::SET_COOKIE, value);
    Ok(resp)
}

// STATS

pub async fn get_stats(headers: HeaderMap) -> ApiResult<Json<StatsSummary>> {
    let summary = with_user(&headers, "", |conn, sess| {
        let row = stats::get_or_create(conn, sess.user_id)?;
        Ok(stats::summary(&row, today()))
    }).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct GoalInput {
    pub goal: i32,
}

pub async fn set_daily_goal(headers: HeaderMap, JsonBody(input): JsonBody<GoalInput>)
    -> ApiResult<Json<StatsSummary>>
{
    let summary = with_user(&headers, "", move |conn, sess| {
        let row = stats::set_daily_goal(conn, sess.user_id, input.goal)?;
        Ok(stats::summary(&row, today()))
    }).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct XpInput {
    pub amount: i32,
}

pub async fn add_xp(headers: HeaderMap, JsonBody(input): JsonBody<XpInput>) -> ApiResult<Json<XpGain>> {
    let gain = with_user(&headers, "", move |conn, sess| {
        if input.amount < 1 || input.amount > MAX_XP_GRANT {
            return invalid(format!("amount must be between 1 and {}", MAX_XP_GRANT));
        }
        let gain = stats::add_xp(conn, sess.user_id, input.amount)?;
        achievements::check(conn, sess.user_id)?;
        Ok(gain)
    }).await?;
    Ok(Json(gain))
}

// VOCABULARY

pub async fn list_sets(headers: HeaderMap) -> ApiResult<Json<Vec<VocabSetSummary>>> {
    let sets = with_user(&headers, "", |conn, _| vocab::list_sets(conn)).await?;
    Ok(Json(sets))
}

pub async fn get_set(headers: HeaderMap, PathParams(id): PathParams<i32>) -> ApiResult<Json<SetDetail>> {
    let set = with_user(&headers, "", move |conn, _| vocab::get_set(conn, id)).await?;
    Ok(Json(set))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

pub async fn search_words(headers: HeaderMap, QueryParams(params): QueryParams<SearchParams>)
    -> ApiResult<Json<Vec<VocabWord>>>
{
    let words = with_user(&headers, "", move |conn, _| {
        let limit = clamp_limit(params.limit, 20, 100)?;
        vocab::search(conn, &params.q, limit)
    }).await?;
    Ok(Json(words))
}

#[derive(Debug, Deserialize)]
pub struct ReviewParams {
    pub set_id: Option<i32>,
    pub limit: Option<i64>,
}

pub async fn review_queue(headers: HeaderMap, QueryParams(params): QueryParams<ReviewParams>)
    -> ApiResult<Json<ReviewQueue>>
{
    let queue = with_user(&headers, "", move |conn, sess| {
        let limit = clamp_limit(params.limit, 20, 100)?;
        vocab::review_queue(conn, sess.user_id, params.set_id, limit, now())
    }).await?;
    Ok(Json(queue))
}

pub async fn card_result(headers: HeaderMap, JsonBody(result): JsonBody<CardResult>)
    -> ApiResult<Json<CardOutcome>>
{
    let outcome = with_user(&headers, "", move |conn, sess| {
        vocab::record_card_result(conn, sess.user_id, &result, today(), now())
    }).await?;
    Ok(Json(outcome))
}

pub async fn progress_overview(headers: HeaderMap) -> ApiResult<Json<ProgressOverview>> {
    let overview = with_user(&headers, "", |conn, sess| {
        vocab::progress_overview(conn, sess.user_id, now())
    }).await?;
    Ok(Json(overview))
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdate {
    pub updates: Vec<ProgressEdit>,
}

pub async fn bulk_update(headers: HeaderMap, JsonBody(input): JsonBody<BulkUpdate>) -> ApiResult<Json<Value>> {
    let updated = with_user(&headers, "", move |conn, sess| {
        vocab::bulk_update_progress(conn, sess.user_id, &input.updates, now())
    }).await?;
    Ok(Json(json!({ "updated": updated })))
}

#[derive(Debug, Deserialize)]
pub struct ResetInput {
    pub set_id: Option<i32>,
}

pub async fn reset_progress(headers: HeaderMap, JsonBody(input): JsonBody<ResetInput>) -> ApiResult<Json<Value>> {
    let reset = with_user(&headers, "", move |conn, sess| {
        vocab::reset_progress(conn, sess.user_id, input.set_id)
    }).await?;
    Ok(Json(json!({ "reset": reset })))
}

// LESSONS

pub async fn list_lessons(headers: HeaderMap) -> ApiResult<Json<Vec<LessonSummary>>> {
    let list = with_user(&headers, "", |conn, sess| lessons::list(conn, sess.user_id)).await?;
    Ok(Json(list))
}

pub async fn get_lesson(headers: HeaderMap, PathParams(id): PathParams<i32>) -> ApiResult<Json<LessonDetail>> {
    let lesson = with_user(&headers, "", move |conn, _| lessons::get(conn, id)).await?;
    Ok(Json(lesson))
}

pub async fn get_lesson_progress(headers: HeaderMap, PathParams(id): PathParams<i32>)
    -> ApiResult<Json<ProgressView>>
{
    let progress = with_user(&headers, "", move |conn, sess| {
        lessons::get_progress(conn, sess.user_id, id)
    }).await?;
    Ok(Json(progress))
}

pub async fn update_lesson_progress(headers: HeaderMap,
                                    PathParams(id): PathParams<i32>,
                                    JsonBody(update): JsonBody<ProgressUpdate>)
    -> ApiResult<Json<ProgressOutcome>>
{
    let outcome = with_user(&headers, "", move |conn, sess| {
        lessons::update_progress(conn, sess.user_id, id, &update, today(), now())
    }).await?;
    Ok(Json(outcome))
}

pub async fn get_quiz(headers: HeaderMap, PathParams(id): PathParams<i32>) -> ApiResult<Json<Vec<QuestionView>>> {
    let questions = with_user(&headers, "", move |conn, _| lessons::quiz(conn, id)).await?;
    Ok(Json(questions))
}

pub async fn quiz_attempts(headers: HeaderMap, PathParams(id): PathParams<i32>)
    -> ApiResult<Json<Vec<QuizAttempt>>>
{
    let attempts = with_user(&headers, "", move |conn, sess| {
        lessons::attempts(conn, sess.user_id, id)
    }).await?;
    Ok(Json(attempts))
}

pub async fn submit_quiz(headers: HeaderMap, JsonBody(submission): JsonBody<QuizSubmission>)
    -> ApiResult<Json<QuizOutcome>>
{
    let outcome = with_user(&headers, "", move |conn, sess| {
        lessons::submit_quiz(conn, sess.user_id, &submission, today(), now())
    }).await?;
    Ok(Json(outcome))
}

// ACHIEVEMENTS & STUDY SESSIONS

pub async fn list_achievements(headers: HeaderMap) -> ApiResult<Json<Vec<AchievementView>>> {
    let list = with_user(&headers, "", |conn, sess| achievements::list(conn, sess.user_id)).await?;
    Ok(Json(list))
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

pub async fn recent_sessions(headers: HeaderMap, QueryParams(params): QueryParams<LimitParams>)
    -> ApiResult<Json<Vec<StudySession>>>
{
    let sessions = with_user(&headers, "", move |conn, sess| {
        let limit = clamp_limit(params.limit, 20, 100)?;
        study::recent_sessions(conn, sess.user_id, limit)
    }).await?;
    Ok(Json(sessions))
}

pub async fn record_session(headers: HeaderMap, JsonBody(input): JsonBody<SessionInput>)
    -> ApiResult<Json<StudySession>>
{
    let recorded = with_user(&headers, "", move |conn, sess| {
        study::record_session(conn, sess.user_id, &input, today(), now())
    }).await?;
    Ok(Json(recorded))
}

// BIBLE

pub async fn bible_books(headers: HeaderMap) -> ApiResult<Json<Vec<BibleBook>>> {
    let books = with_user(&headers, "", |conn, _| bible::books(conn)).await?;
    Ok(Json(books))
}

pub async fn bible_chapter(headers: HeaderMap, PathParams((book, chapter)): PathParams<(String, i32)>)
    -> ApiResult<Json<Chapter>>
{
    let chapter = with_user(&headers, "", move |conn, _| bible::chapter(conn, &book, chapter)).await?;
    Ok(Json(chapter))
}

pub async fn strongs_entry(headers: HeaderMap, PathParams(number): PathParams<String>)
    -> ApiResult<Json<StrongsView>>
{
    let entry = with_user(&headers, "", move |conn, _| bible::strongs(conn, &number)).await?;
    Ok(Json(entry))
}
