use crate::models::{NewVideo, Video, VideoDetail};
use sqlx::PgPool;

pub(crate) const INSERT_VIDEO: &str = r#"
    INSERT INTO videos (url, title, description, author_id)
    VALUES ($1, $2, $3, $4)
    RETURNING video_id, url, title, description, views, author_id
"#;

/// List every video with its author and comments
pub async fn find_all_videos(pool: &PgPool) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(video_detail_select!(), "ORDER BY v.video_id"))
        .fetch_all(pool)
        .await
}

pub async fn find_video_by_id(
    pool: &PgPool,
    video_id: i32,
) -> Result<Option<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(video_detail_select!(), "WHERE v.video_id = $1"))
        .bind(video_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_video_by_url(
    pool: &PgPool,
    url: &str,
) -> Result<Option<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(video_detail_select!(), "WHERE v.url = $1"))
        .bind(url)
        .fetch_optional(pool)
        .await
}

pub async fn find_videos_by_author_id(
    pool: &PgPool,
    author_id: i32,
) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(
        video_detail_select!(),
        "WHERE v.author_id = $1 ORDER BY v.video_id"
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn find_videos_by_author_nick(
    pool: &PgPool,
    nick: &str,
) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(
        video_detail_select!(),
        "WHERE v.author_id IN (SELECT user_id FROM users WHERE nick = $1) ORDER BY v.video_id"
    ))
    .bind(nick)
    .fetch_all(pool)
    .await
}

pub async fn find_videos_by_author_email(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(
        video_detail_select!(),
        "WHERE v.author_id IN (SELECT user_id FROM users WHERE email = $1) ORDER BY v.video_id"
    ))
    .bind(email)
    .fetch_all(pool)
    .await
}

/// Videos whose title contains `needle` (case-sensitive)
pub async fn search_videos_by_title(
    pool: &PgPool,
    needle: &str,
) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(
        video_detail_select!(),
        "WHERE strpos(v.title, $1) > 0 ORDER BY v.video_id"
    ))
    .bind(needle)
    .fetch_all(pool)
    .await
}

/// Videos whose description contains `needle` (case-sensitive)
pub async fn search_videos_by_description(
    pool: &PgPool,
    needle: &str,
) -> Result<Vec<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(concat!(
        video_detail_select!(),
        "WHERE strpos(v.description, $1) > 0 ORDER BY v.video_id"
    ))
    .bind(needle)
    .fetch_all(pool)
    .await
}

pub async fn create_video(
    pool: &PgPool,
    author_id: i32,
    video: &NewVideo,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(INSERT_VIDEO)
        .bind(&video.url)
        .bind(&video.title)
        .bind(&video.description)
        .bind(author_id)
        .fetch_one(pool)
        .await
}

/// Replace url, title and description. Views and author are untouched.
pub async fn update_video_by_id(
    pool: &PgPool,
    video_id: i32,
    video: &NewVideo,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos SET url = $2, title = $3, description = $4
        WHERE video_id = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(video_id)
    .bind(&video.url)
    .bind(&video.title)
    .bind(&video.description)
    .fetch_one(pool)
    .await
}

pub async fn update_video_by_url(
    pool: &PgPool,
    url: &str,
    video: &NewVideo,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos SET url = $2, title = $3, description = $4
        WHERE url = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(url)
    .bind(&video.url)
    .bind(&video.title)
    .bind(&video.description)
    .fetch_one(pool)
    .await
}

pub async fn update_video_title(
    pool: &PgPool,
    video_id: i32,
    title: &str,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos SET title = $2
        WHERE video_id = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(video_id)
    .bind(title)
    .fetch_one(pool)
    .await
}

/// Set or clear (`None`) the description
pub async fn update_video_description(
    pool: &PgPool,
    video_id: i32,
    description: Option<&str>,
) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos SET description = $2
        WHERE video_id = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(video_id)
    .bind(description)
    .fetch_one(pool)
    .await
}

/// Bump the view counter by one.
///
/// The increment happens in the statement itself so concurrent calls never
/// lose an update.
pub async fn increment_video_views(pool: &PgPool, video_id: i32) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        UPDATE videos SET views = views + 1
        WHERE video_id = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(video_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_video_by_id(pool: &PgPool, video_id: i32) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        DELETE FROM videos WHERE video_id = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(video_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_video_by_url(pool: &PgPool, url: &str) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        DELETE FROM videos WHERE url = $1
        RETURNING video_id, url, title, description, views, author_id
        "#,
    )
    .bind(url)
    .fetch_one(pool)
    .await
}

/// Delete every video by an author, returning how many rows went away
pub async fn delete_videos_by_author(pool: &PgPool, author_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE author_id = $1")
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
