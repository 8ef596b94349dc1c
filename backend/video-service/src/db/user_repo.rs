use crate::models::{NewUser, NewVideo, User, UserDetail, Video};
use sqlx::{PgPool, Postgres, Transaction};

use super::comment_repo::INSERT_COMMENT;
use super::video_repo::INSERT_VIDEO;

pub(crate) const INSERT_USER: &str = r#"
    INSERT INTO users (email, nick, full_name, admin)
    VALUES ($1, $2, $3, $4)
    RETURNING user_id, email, nick, full_name, admin
"#;

/// List every user with their videos and comments
pub async fn find_all_users(pool: &PgPool) -> Result<Vec<UserDetail>, sqlx::Error> {
    sqlx::query_as::<_, UserDetail>(concat!(user_detail_select!(), "ORDER BY u.user_id"))
        .fetch_all(pool)
        .await
}

pub async fn find_user_by_id(pool: &PgPool, user_id: i32) -> Result<Option<UserDetail>, sqlx::Error> {
    sqlx::query_as::<_, UserDetail>(concat!(user_detail_select!(), "WHERE u.user_id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_nick(pool: &PgPool, nick: &str) -> Result<Option<UserDetail>, sqlx::Error> {
    sqlx::query_as::<_, UserDetail>(concat!(user_detail_select!(), "WHERE u.nick = $1"))
        .bind(nick)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserDetail>, sqlx::Error> {
    sqlx::query_as::<_, UserDetail>(concat!(user_detail_select!(), "WHERE u.email = $1"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Insert a user and return the stored row
pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(INSERT_USER)
        .bind(&user.email)
        .bind(&user.nick)
        .bind(&user.full_name)
        .bind(user.admin)
        .fetch_one(pool)
        .await
}

/// Replace every mutable field of the user with the given id.
///
/// Returns `RowNotFound` when no user has that id.
pub async fn update_user_by_id(
    pool: &PgPool,
    user_id: i32,
    user: &NewUser,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET email = $2, nick = $3, full_name = $4, admin = $5
        WHERE user_id = $1
        RETURNING user_id, email, nick, full_name, admin
        "#,
    )
    .bind(user_id)
    .bind(&user.email)
    .bind(&user.nick)
    .bind(&user.full_name)
    .bind(user.admin)
    .fetch_one(pool)
    .await
}

/// Replace every mutable field of the user currently holding `nick`
pub async fn update_user_by_nick(
    pool: &PgPool,
    nick: &str,
    user: &NewUser,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET email = $2, nick = $3, full_name = $4, admin = $5
        WHERE nick = $1
        RETURNING user_id, email, nick, full_name, admin
        "#,
    )
    .bind(nick)
    .bind(&user.email)
    .bind(&user.nick)
    .bind(&user.full_name)
    .bind(user.admin)
    .fetch_one(pool)
    .await
}

pub async fn delete_user_by_id(pool: &PgPool, user_id: i32) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "DELETE FROM users WHERE user_id = $1 RETURNING user_id, email, nick, full_name, admin",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_user_by_nick(pool: &PgPool, nick: &str) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "DELETE FROM users WHERE nick = $1 RETURNING user_id, email, nick, full_name, admin",
    )
    .bind(nick)
    .fetch_one(pool)
    .await
}

/// Create a user, their videos, and one comment per video authored by the
/// new user, all in one transaction.
///
/// Each entry of `content` is a video plus the text of the comment to leave
/// on it. Nothing is committed unless every insert succeeds.
pub async fn create_user_with_content(
    pool: &PgPool,
    user: &NewUser,
    content: &[(NewVideo, String)],
) -> Result<UserDetail, sqlx::Error> {
    let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

    let created = sqlx::query_as::<_, User>(INSERT_USER)
        .bind(&user.email)
        .bind(&user.nick)
        .bind(&user.full_name)
        .bind(user.admin)
        .fetch_one(tx.as_mut())
        .await?;

    let mut video_ids = Vec::with_capacity(content.len());
    for (video, _) in content {
        let inserted = sqlx::query_as::<_, Video>(INSERT_VIDEO)
            .bind(&video.url)
            .bind(&video.title)
            .bind(&video.description)
            .bind(created.user_id)
            .fetch_one(tx.as_mut())
            .await?;
        video_ids.push(inserted.video_id);
    }

    // Second phase needs the ids generated above.
    for (video_id, (_, text)) in video_ids.iter().zip(content) {
        sqlx::query(INSERT_COMMENT)
            .bind(text)
            .bind(*video_id)
            .bind(created.user_id)
            .bind(None::<i32>)
            .execute(tx.as_mut())
            .await?;
    }

    let detail =
        sqlx::query_as::<_, UserDetail>(concat!(user_detail_select!(), "WHERE u.user_id = $1"))
            .bind(created.user_id)
            .fetch_one(tx.as_mut())
            .await?;

    tx.commit().await?;

    Ok(detail)
}
