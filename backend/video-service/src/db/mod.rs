/// Database access layer
///
/// One repository module per entity. Each function issues a single statement
/// against the shared pool; "find" queries attach relations through correlated
/// JSON subqueries so callers never issue a follow-up fetch.
use sqlx::PgPool;

macro_rules! user_json {
    ($t:literal) => {
        concat!(
            "json_build_object('userId', ", $t, ".user_id, 'email', ", $t, ".email, ",
            "'nick', ", $t, ".nick, 'fullName', ", $t, ".full_name, 'admin', ", $t, ".admin)"
        )
    };
}

macro_rules! video_json {
    ($t:literal) => {
        concat!(
            "json_build_object('videoId', ", $t, ".video_id, 'url', ", $t, ".url, ",
            "'title', ", $t, ".title, 'description', ", $t, ".description, ",
            "'views', ", $t, ".views, 'authorId', ", $t, ".author_id)"
        )
    };
}

macro_rules! comment_json {
    ($t:literal) => {
        concat!(
            "json_build_object('commentId', ", $t, ".comment_id, 'text', ", $t, ".text, ",
            "'videoId', ", $t, ".video_id, 'authorId', ", $t, ".author_id, ",
            "'parentId', ", $t, ".parent_id)"
        )
    };
}

/// `SELECT` prefix for [`crate::models::UserDetail`], aliased `u`
macro_rules! user_detail_select {
    () => {
        concat!(
            "SELECT u.user_id, u.email, u.nick, u.full_name, u.admin, ",
            "COALESCE((SELECT json_agg(", video_json!("v"), " ORDER BY v.video_id) ",
            "FROM videos v WHERE v.author_id = u.user_id), '[]'::json) AS videos, ",
            "COALESCE((SELECT json_agg(", comment_json!("c"), " ORDER BY c.comment_id) ",
            "FROM comments c WHERE c.author_id = u.user_id), '[]'::json) AS comments ",
            "FROM users u "
        )
    };
}

/// `SELECT` prefix for [`crate::models::VideoDetail`], aliased `v`
macro_rules! video_detail_select {
    () => {
        concat!(
            "SELECT v.video_id, v.url, v.title, v.description, v.views, v.author_id, ",
            "(SELECT ", user_json!("a"), " FROM users a WHERE a.user_id = v.author_id) AS author, ",
            "COALESCE((SELECT json_agg(", comment_json!("c"), " ORDER BY c.comment_id) ",
            "FROM comments c WHERE c.video_id = v.video_id), '[]'::json) AS comments ",
            "FROM videos v "
        )
    };
}

/// `SELECT` prefix for [`crate::models::CommentDetail`], aliased `c`
macro_rules! comment_detail_select {
    () => {
        concat!(
            "SELECT c.comment_id, c.text, c.video_id, c.author_id, c.parent_id, ",
            "(SELECT ", user_json!("a"), " FROM users a WHERE a.user_id = c.author_id) AS author, ",
            "(SELECT ", video_json!("v"), " FROM videos v WHERE v.video_id = c.video_id) AS video, ",
            "(SELECT ", comment_json!("p"), " FROM comments p WHERE p.comment_id = c.parent_id) AS parent, ",
            "COALESCE((SELECT json_agg(", comment_json!("ch"), " ORDER BY ch.comment_id) ",
            "FROM comments ch WHERE ch.parent_id = c.comment_id), '[]'::json) AS children ",
            "FROM comments c "
        )
    };
}

pub mod comment_repo;
pub mod user_repo;
pub mod video_repo;

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    #[test]
    fn detail_selects_alias_every_relation() {
        let user = user_detail_select!();
        assert!(user.contains("AS videos"));
        assert!(user.contains("AS comments"));
        assert!(!user.contains("'fullName'"));

        let video = video_detail_select!();
        assert!(video.contains("'fullName', a.full_name"));
        assert!(video.ends_with("FROM videos v "));

        let comment = comment_detail_select!();
        for alias in ["AS author", "AS video", "AS parent", "AS children"] {
            assert!(comment.contains(alias), "missing {alias}");
        }
    }

    #[test]
    fn json_fragments_use_wire_names() {
        assert_eq!(
            comment_json!("p"),
            "json_build_object('commentId', p.comment_id, 'text', p.text, \
             'videoId', p.video_id, 'authorId', p.author_id, 'parentId', p.parent_id)"
        );
    }
}
