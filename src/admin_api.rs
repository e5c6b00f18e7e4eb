use axum::http::{HeaderMap, StatusCode};
use axum::routing::{post, put};
use axum::{Json, Router};

use lashon_backend::lessons::{self, LessonInput};
use lashon_backend::models::{Lesson, UpdateVocabSet, VocabSet};
use lashon_backend::vocab::{self, SetDetail, SetInput};

use crate::helpers::*;

pub const ADMINS: &str = "admins";

pub fn routes() -> Router {
    Router::new()
        .route("/api/admin/vocab/sets", post(create_set))
        .route("/api/admin/vocab/sets/{id}", put(update_set).delete(delete_set))
        .route("/api/admin/lessons", post(create_lesson))
}

pub async fn create_set(headers: HeaderMap, JsonBody(input): JsonBody<SetInput>)
    -> ApiResult<(StatusCode, Json<SetDetail>)>
{
    let created = with_user(&headers, ADMINS, move |conn, sess| {
        info!("User {} creates the vocabulary set {:?}.", sess.user_id, input.name);
        vocab::create_set(conn, &input)
    }).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_set(headers: HeaderMap,
                        PathParams(id): PathParams<i32>,
                        JsonBody(changes): JsonBody<UpdateVocabSet>)
    -> ApiResult<Json<VocabSet>>
{
    let updated = with_user(&headers, ADMINS, move |conn, _| vocab::update_set(conn, id, &changes)).await?;
    Ok(Json(updated))
}

pub async fn delete_set(headers: HeaderMap, PathParams(id): PathParams<i32>) -> ApiResult<StatusCode> {
    with_user(&headers, ADMINS, move |conn, sess| {
        info!("User {} deletes the vocabulary set {}.", sess.user_id, id);
        vocab::delete_set(conn, id)
    }).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_lesson(headers: HeaderMap, JsonBody(input): JsonBody<LessonInput>)
    -> ApiResult<(StatusCode, Json<Lesson>)>
{
    let lesson = with_user(&headers, ADMINS, move |conn, _| lessons::create_lesson(conn, &input)).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}
