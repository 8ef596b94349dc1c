/// Comment handlers - HTTP endpoints under `/comments`
use crate::db::comment_repo;
use crate::error::Result;
use crate::models::{Count, NewComment};
use crate::validation::schemas::{
    CommentBody, CommentSearchQuery, CommentUpdateBody, EmailPath, IdPath, NickPath, UrlPath,
    VideoAuthorPath,
};
use crate::validation::validated;
use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;

/// GET /comments
#[get("")]
async fn list_comments(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let comments = comment_repo::find_all_comments(&pool).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/search?text=...
#[get("/search")]
async fn search_comments(
    pool: web::Data<PgPool>,
    query: web::Query<CommentSearchQuery>,
) -> Result<HttpResponse> {
    let CommentSearchQuery { text } = validated(query.into_inner())?;
    let comments = comment_repo::search_comments_by_text(&pool, &text).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/{id}
#[get("/{id}")]
async fn get_comment(pool: web::Data<PgPool>, path: web::Path<IdPath>) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let comment = comment_repo::find_comment_by_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// GET /comments/author/id/{id}
#[get("/author/id/{id}")]
async fn get_comments_by_author_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_author_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/author/nick/{nick}
#[get("/author/nick/{nick}")]
async fn get_comments_by_author_nick(
    pool: web::Data<PgPool>,
    path: web::Path<NickPath>,
) -> Result<HttpResponse> {
    let NickPath { nick } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_author_nick(&pool, &nick).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/author/email/{email}
#[get("/author/email/{email}")]
async fn get_comments_by_author_email(
    pool: web::Data<PgPool>,
    path: web::Path<EmailPath>,
) -> Result<HttpResponse> {
    let EmailPath { email } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_author_email(&pool, &email).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/video/id/{id}
#[get("/video/id/{id}")]
async fn get_comments_by_video_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_video_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/video/url/{url}
#[get("/video/url/{url}")]
async fn get_comments_by_video_url(
    pool: web::Data<PgPool>,
    path: web::Path<UrlPath>,
) -> Result<HttpResponse> {
    let UrlPath { url } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_video_url(&pool, &url).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /comments/video/{videoId}/author/{authorId}
#[get("/video/{videoId}/author/{authorId}")]
async fn get_comments_by_video_and_author(
    pool: web::Data<PgPool>,
    path: web::Path<VideoAuthorPath>,
) -> Result<HttpResponse> {
    let VideoAuthorPath {
        video_id,
        author_id,
    } = validated(path.into_inner())?;
    let comments =
        comment_repo::find_comments_by_video_and_author(&pool, video_id, author_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Direct replies to a comment
/// GET /comments/parent/{id}
#[get("/parent/{id}")]
async fn get_comment_children(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let comments = comment_repo::find_comments_by_parent(&pool, id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /comments
#[post("")]
async fn create_comment(
    pool: web::Data<PgPool>,
    body: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    let comment: NewComment = validated(body.into_inner())?.into();
    let created = comment_repo::create_comment(&pool, &comment).await?;

    tracing::info!(
        comment_id = created.comment_id,
        video_id = created.video_id,
        parent_id = ?created.parent_id,
        "Comment created"
    );
    Ok(HttpResponse::Ok().json(created))
}

/// PUT /comments/{id}
#[put("/{id}")]
async fn update_comment(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
    body: web::Json<CommentUpdateBody>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let CommentUpdateBody { text, parent_id } = validated(body.into_inner())?;
    let updated = comment_repo::update_comment(&pool, id, &text, parent_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Bulk update every comment an author left on a video
/// PUT /comments/video/{videoId}/author/{authorId}
#[put("/video/{videoId}/author/{authorId}")]
async fn update_comments_by_video_and_author(
    pool: web::Data<PgPool>,
    path: web::Path<VideoAuthorPath>,
    body: web::Json<CommentUpdateBody>,
) -> Result<HttpResponse> {
    let VideoAuthorPath {
        video_id,
        author_id,
    } = validated(path.into_inner())?;
    let CommentUpdateBody { text, parent_id } = validated(body.into_inner())?;
    let count = comment_repo::update_comments_by_video_and_author(
        &pool, video_id, author_id, &text, parent_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(Count::from(count)))
}

/// DELETE /comments/id/{id}
#[delete("/id/{id}")]
async fn delete_comment(pool: web::Data<PgPool>, path: web::Path<IdPath>) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let deleted = comment_repo::delete_comment_by_id(&pool, id).await?;

    tracing::info!(comment_id = deleted.comment_id, "Comment deleted");
    Ok(HttpResponse::Ok().json(deleted))
}

/// DELETE /comments/video/{id}
#[delete("/video/{id}")]
async fn delete_comments_by_video(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let count = comment_repo::delete_comments_by_video(&pool, id).await?;

    tracing::info!(video_id = id, count, "Comments deleted by video");
    Ok(HttpResponse::Ok().json(Count::from(count)))
}

/// DELETE /comments/author/{id}
#[delete("/author/{id}")]
async fn delete_comments_by_author(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let count = comment_repo::delete_comments_by_author(&pool, id).await?;

    tracing::info!(author_id = id, count, "Comments deleted by author");
    Ok(HttpResponse::Ok().json(Count::from(count)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/search` must be registered ahead of `/{id}`
    cfg.service(list_comments)
        .service(search_comments)
        .service(get_comment)
        .service(get_comments_by_author_id)
        .service(get_comments_by_author_nick)
        .service(get_comments_by_author_email)
        .service(get_comments_by_video_id)
        .service(get_comments_by_video_url)
        .service(get_comments_by_video_and_author)
        .service(get_comment_children)
        .service(create_comment)
        .service(update_comment)
        .service(update_comments_by_video_and_author)
        .service(delete_comment)
        .service(delete_comments_by_video)
        .service(delete_comments_by_author);
}
