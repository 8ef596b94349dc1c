use crate::models::{Comment, CommentDetail, NewComment};
use sqlx::PgPool;

pub(crate) const INSERT_COMMENT: &str = r#"
    INSERT INTO comments (text, video_id, author_id, parent_id)
    VALUES ($1, $2, $3, $4)
    RETURNING comment_id, text, video_id, author_id, parent_id
"#;

/// List every comment with author, video, parent and replies
pub async fn find_all_comments(pool: &PgPool) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(comment_detail_select!(), "ORDER BY c.comment_id"))
        .fetch_all(pool)
        .await
}

pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: i32,
) -> Result<Option<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.comment_id = $1"
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

pub async fn find_comments_by_author_id(
    pool: &PgPool,
    author_id: i32,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.author_id = $1 ORDER BY c.comment_id"
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await
}

pub async fn find_comments_by_author_nick(
    pool: &PgPool,
    nick: &str,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.author_id IN (SELECT user_id FROM users WHERE nick = $1) ORDER BY c.comment_id"
    ))
    .bind(nick)
    .fetch_all(pool)
    .await
}

pub async fn find_comments_by_author_email(
    pool: &PgPool,
    email: &str,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.author_id IN (SELECT user_id FROM users WHERE email = $1) ORDER BY c.comment_id"
    ))
    .bind(email)
    .fetch_all(pool)
    .await
}

pub async fn find_comments_by_video_id(
    pool: &PgPool,
    video_id: i32,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.video_id = $1 ORDER BY c.comment_id"
    ))
    .bind(video_id)
    .fetch_all(pool)
    .await
}

pub async fn find_comments_by_video_url(
    pool: &PgPool,
    url: &str,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.video_id IN (SELECT video_id FROM videos WHERE url = $1) ORDER BY c.comment_id"
    ))
    .bind(url)
    .fetch_all(pool)
    .await
}

/// Comments left by one author on one video
pub async fn find_comments_by_video_and_author(
    pool: &PgPool,
    video_id: i32,
    author_id: i32,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.video_id = $1 AND c.author_id = $2 ORDER BY c.comment_id"
    ))
    .bind(video_id)
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Direct replies to a comment
pub async fn find_comments_by_parent(
    pool: &PgPool,
    parent_id: i32,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE c.parent_id = $1 ORDER BY c.comment_id"
    ))
    .bind(parent_id)
    .fetch_all(pool)
    .await
}

/// Comments whose text contains `needle` (case-sensitive)
pub async fn search_comments_by_text(
    pool: &PgPool,
    needle: &str,
) -> Result<Vec<CommentDetail>, sqlx::Error> {
    sqlx::query_as::<_, CommentDetail>(concat!(
        comment_detail_select!(),
        "WHERE strpos(c.text, $1) > 0 ORDER BY c.comment_id"
    ))
    .bind(needle)
    .fetch_all(pool)
    .await
}

pub async fn create_comment(pool: &PgPool, comment: &NewComment) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(INSERT_COMMENT)
        .bind(&comment.text)
        .bind(comment.video_id)
        .bind(comment.author_id)
        .bind(comment.parent_id)
        .fetch_one(pool)
        .await
}

/// Replace the text and parent of one comment
pub async fn update_comment(
    pool: &PgPool,
    comment_id: i32,
    text: &str,
    parent_id: Option<i32>,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments SET text = $2, parent_id = $3
        WHERE comment_id = $1
        RETURNING comment_id, text, video_id, author_id, parent_id
        "#,
    )
    .bind(comment_id)
    .bind(text)
    .bind(parent_id)
    .fetch_one(pool)
    .await
}

/// Replace text and parent on every comment an author left on a video.
///
/// Returns the number of rows changed; zero is not an error.
pub async fn update_comments_by_video_and_author(
    pool: &PgPool,
    video_id: i32,
    author_id: i32,
    text: &str,
    parent_id: Option<i32>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments SET text = $3, parent_id = $4
        WHERE video_id = $1 AND author_id = $2
        "#,
    )
    .bind(video_id)
    .bind(author_id)
    .bind(text)
    .bind(parent_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_comment_by_id(pool: &PgPool, comment_id: i32) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        DELETE FROM comments WHERE comment_id = $1
        RETURNING comment_id, text, video_id, author_id, parent_id
        "#,
    )
    .bind(comment_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_comments_by_video(pool: &PgPool, video_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE video_id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_comments_by_author(pool: &PgPool, author_id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE author_id = $1")
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
