/// Video handlers - HTTP endpoints under `/videos`
use crate::db::video_repo;
use crate::error::Result;
use crate::models::{Count, NewVideo};
use crate::validation::schemas::{
    EmailPath, IdPath, NickPath, UrlPath, VideoBody, VideoDescriptionBody, VideoSearch,
    VideoSearchQuery, VideoTitleBody, VideoUpdateBody,
};
use crate::validation::validated;
use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;

/// GET /videos
#[get("")]
async fn list_videos(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let videos = video_repo::find_all_videos(&pool).await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /videos/id/{id}
#[get("/id/{id}")]
async fn get_video_by_id(pool: web::Data<PgPool>, path: web::Path<IdPath>) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let video = video_repo::find_video_by_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// GET /videos/url/{url}
#[get("/url/{url}")]
async fn get_video_by_url(
    pool: web::Data<PgPool>,
    path: web::Path<UrlPath>,
) -> Result<HttpResponse> {
    let UrlPath { url } = validated(path.into_inner())?;
    let video = video_repo::find_video_by_url(&pool, &url).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// GET /videos/author/id/{id}
#[get("/author/id/{id}")]
async fn get_videos_by_author_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let videos = video_repo::find_videos_by_author_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /videos/author/nick/{nick}
#[get("/author/nick/{nick}")]
async fn get_videos_by_author_nick(
    pool: web::Data<PgPool>,
    path: web::Path<NickPath>,
) -> Result<HttpResponse> {
    let NickPath { nick } = validated(path.into_inner())?;
    let videos = video_repo::find_videos_by_author_nick(&pool, &nick).await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /videos/author/email/{email}
#[get("/author/email/{email}")]
async fn get_videos_by_author_email(
    pool: web::Data<PgPool>,
    path: web::Path<EmailPath>,
) -> Result<HttpResponse> {
    let EmailPath { email } = validated(path.into_inner())?;
    let videos = video_repo::find_videos_by_author_email(&pool, &email).await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// Substring search on title or description
/// GET /videos/search?title=...  |  ?description=...
#[get("/search")]
async fn search_videos(
    pool: web::Data<PgPool>,
    query: web::Query<VideoSearchQuery>,
) -> Result<HttpResponse> {
    let videos = match validated(query.into_inner())?.criterion()? {
        VideoSearch::Title(title) => video_repo::search_videos_by_title(&pool, &title).await?,
        VideoSearch::Description(description) => {
            video_repo::search_videos_by_description(&pool, &description).await?
        }
    };
    Ok(HttpResponse::Ok().json(videos))
}

/// POST /videos
#[post("")]
async fn create_video(pool: web::Data<PgPool>, body: web::Json<VideoBody>) -> Result<HttpResponse> {
    let (author_id, video) = validated(body.into_inner())?.into_parts();
    let created = video_repo::create_video(&pool, author_id, &video).await?;

    tracing::info!(video_id = created.video_id, author_id, "Video created");
    Ok(HttpResponse::Ok().json(created))
}

/// PUT /videos/id/{id}
#[put("/id/{id}")]
async fn update_video_by_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
    body: web::Json<VideoUpdateBody>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let video: NewVideo = validated(body.into_inner())?.into();
    let updated = video_repo::update_video_by_id(&pool, id, &video).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /videos/url/{url}
#[put("/url/{url}")]
async fn update_video_by_url(
    pool: web::Data<PgPool>,
    path: web::Path<UrlPath>,
    body: web::Json<VideoUpdateBody>,
) -> Result<HttpResponse> {
    let UrlPath { url } = validated(path.into_inner())?;
    let video: NewVideo = validated(body.into_inner())?.into();
    let updated = video_repo::update_video_by_url(&pool, &url, &video).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /videos/title/{id}
#[put("/title/{id}")]
async fn update_video_title(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
    body: web::Json<VideoTitleBody>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let VideoTitleBody { title } = validated(body.into_inner())?;
    let updated = video_repo::update_video_title(&pool, id, &title).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /videos/description/{id}
#[put("/description/{id}")]
async fn update_video_description(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
    body: web::Json<VideoDescriptionBody>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let VideoDescriptionBody { description } = validated(body.into_inner())?;
    let updated = video_repo::update_video_description(&pool, id, description.as_deref()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Record one view
/// PUT /videos/views/{id}
#[put("/views/{id}")]
async fn increment_video_views(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let updated = video_repo::increment_video_views(&pool, id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /videos/id/{id}
#[delete("/id/{id}")]
async fn delete_video_by_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let deleted = video_repo::delete_video_by_id(&pool, id).await?;

    tracing::info!(video_id = deleted.video_id, "Video deleted");
    Ok(HttpResponse::Ok().json(deleted))
}

/// DELETE /videos/url/{url}
#[delete("/url/{url}")]
async fn delete_video_by_url(
    pool: web::Data<PgPool>,
    path: web::Path<UrlPath>,
) -> Result<HttpResponse> {
    let UrlPath { url } = validated(path.into_inner())?;
    let deleted = video_repo::delete_video_by_url(&pool, &url).await?;

    tracing::info!(video_id = deleted.video_id, "Video deleted");
    Ok(HttpResponse::Ok().json(deleted))
}

/// Bulk delete every video by an author
/// DELETE /videos/author/{id}
#[delete("/author/{id}")]
async fn delete_videos_by_author(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let count = video_repo::delete_videos_by_author(&pool, id).await?;

    tracing::info!(author_id = id, count, "Videos deleted by author");
    Ok(HttpResponse::Ok().json(Count::from(count)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_videos)
        .service(search_videos)
        .service(get_video_by_id)
        .service(get_video_by_url)
        .service(get_videos_by_author_id)
        .service(get_videos_by_author_nick)
        .service(get_videos_by_author_email)
        .service(create_video)
        .service(update_video_by_id)
        .service(update_video_by_url)
        .service(update_video_title)
        .service(update_video_description)
        .service(increment_video_views)
        .service(delete_video_by_id)
        .service(delete_video_by_url)
        .service(delete_videos_by_author);
}
