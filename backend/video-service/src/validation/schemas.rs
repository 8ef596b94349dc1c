/// Per-route input schemas
use super::coerce;
use crate::error::{AppError, Result};
use crate::models::{NewComment, NewUser, NewVideo};
use serde::Deserialize;
use validator::Validate;

// ---------------------------------------------------------------------------
// Path parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct IdPath {
    #[serde(deserialize_with = "coerce::id")]
    pub id: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NickPath {
    #[validate(length(min = 3, max = 255))]
    pub nick: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmailPath {
    #[validate(email, length(min = 5))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UrlPath {
    #[validate(custom(function = "crate::validation::validate_url_code"))]
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoAuthorPath {
    #[serde(deserialize_with = "coerce::id")]
    pub video_id: i32,
    #[serde(deserialize_with = "coerce::id")]
    pub author_id: i32,
}

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct VideoSearchQuery {
    #[validate(length(min = 3, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 3, max = 255))]
    pub description: Option<String>,
}

/// Which column a video search matches against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSearch {
    Title(String),
    Description(String),
}

impl VideoSearchQuery {
    /// Pick the search column. `title` wins when both are given.
    pub fn criterion(self) -> Result<VideoSearch> {
        match (self.title, self.description) {
            (Some(title), _) => Ok(VideoSearch::Title(title)),
            (None, Some(description)) => Ok(VideoSearch::Description(description)),
            (None, None) => Err(AppError::invalid(
                "query",
                "Missing query parameter: either 'title' or 'description' is required",
            )),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentSearchQuery {
    #[validate(length(min = 3, max = 255))]
    pub text: String,
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// Body for user create and whole-record update
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[validate(email, length(min = 5))]
    pub email: String,
    #[validate(length(min = 3, max = 255))]
    pub nick: String,
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(default)]
    pub admin: bool,
}

impl From<UserBody> for NewUser {
    fn from(body: UserBody) -> Self {
        NewUser {
            email: body.email,
            nick: body.nick,
            full_name: body.full_name,
            admin: body.admin,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoBody {
    #[serde(deserialize_with = "coerce::id")]
    pub author_id: i32,
    #[validate(custom(function = "crate::validation::validate_url_code"))]
    pub url: String,
    #[validate(length(min = 3, max = 255))]
    pub title: String,
    #[validate(length(min = 3, max = 255))]
    pub description: Option<String>,
}

impl VideoBody {
    pub fn into_parts(self) -> (i32, NewVideo) {
        (
            self.author_id,
            NewVideo {
                url: self.url,
                title: self.title,
                description: self.description,
            },
        )
    }
}

/// Whole-video update. Ownership never moves, so an `authorId` is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct VideoUpdateBody {
    #[validate(custom(function = "crate::validation::validate_url_code"))]
    pub url: String,
    #[validate(length(min = 3, max = 255))]
    pub title: String,
    #[validate(length(min = 3, max = 255))]
    pub description: Option<String>,
}

impl From<VideoUpdateBody> for NewVideo {
    fn from(body: VideoUpdateBody) -> Self {
        NewVideo {
            url: body.url,
            title: body.title,
            description: body.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct VideoTitleBody {
    #[validate(length(min = 3, max = 255))]
    pub title: String,
}

/// `description: null` (or an absent field) clears the description
#[derive(Debug, Deserialize, Validate)]
pub struct VideoDescriptionBody {
    #[serde(default)]
    #[validate(length(min = 3, max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    #[serde(deserialize_with = "coerce::id")]
    pub author_id: i32,
    #[serde(deserialize_with = "coerce::id")]
    pub video_id: i32,
    #[validate(length(min = 3, max = 255))]
    pub text: String,
    #[serde(default, deserialize_with = "coerce::optional_id")]
    pub parent_id: Option<i32>,
}

impl From<CommentBody> for NewComment {
    fn from(body: CommentBody) -> Self {
        NewComment {
            text: body.text,
            video_id: body.video_id,
            author_id: body.author_id,
            parent_id: body.parent_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentUpdateBody {
    #[validate(length(min = 3, max = 255))]
    pub text: String,
    #[serde(default, deserialize_with = "coerce::optional_id")]
    pub parent_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validated;

    #[test]
    fn user_body_defaults_admin_and_checks_nick() {
        let body: UserBody =
            serde_json::from_str(r#"{"email":"rei.ayanami@nerv.net","nick":"rAy"}"#).unwrap();
        let body = validated(body).unwrap();
        assert!(!body.admin);
        assert_eq!(body.full_name, None);

        let short: UserBody =
            serde_json::from_str(r#"{"email":"rei.ayanami@nerv.net","nick":"rA"}"#).unwrap();
        assert!(matches!(validated(short), Err(AppError::Validation(_))));
    }

    #[test]
    fn user_body_rejects_malformed_email() {
        let body: UserBody =
            serde_json::from_str(r#"{"email":"not-an-email","nick":"rAyanami"}"#).unwrap();
        let err = validated(body).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn video_body_coerces_author_and_checks_url() {
        let body: VideoBody = serde_json::from_str(
            r#"{"authorId":"3","url":"Lo2qQmj0_h4","title":"Smells Like Teen Spirit"}"#,
        )
        .unwrap();
        let (author_id, video) = validated(body).unwrap().into_parts();
        assert_eq!(author_id, 3);
        assert_eq!(video.description, None);

        for url in ["short", "Lo2qQmj0_h4x"] {
            let body: VideoBody = serde_json::from_value(serde_json::json!({
                "authorId": 3,
                "url": url,
                "title": "Smells Like Teen Spirit",
            }))
            .unwrap();
            assert!(validated(body).is_err(), "{url} should be rejected");
        }
    }

    #[test]
    fn video_update_ignores_author_id() {
        let body: VideoUpdateBody = serde_json::from_str(
            r#"{"authorId":99,"url":"Lo2qQmj0_h4","title":"New title","description":"Grunge"}"#,
        )
        .unwrap();
        let video: NewVideo = validated(body).unwrap().into();
        assert_eq!(video.title, "New title");
        assert_eq!(video.description.as_deref(), Some("Grunge"));
    }

    #[test]
    fn description_body_null_clears() {
        let body: VideoDescriptionBody = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(validated(body).unwrap().description, None);

        let body: VideoDescriptionBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.description, None);

        let body: VideoDescriptionBody = serde_json::from_str(r#"{"description":"ab"}"#).unwrap();
        assert!(validated(body).is_err());
    }

    #[test]
    fn comment_body_parent_is_optional() {
        let body: CommentBody =
            serde_json::from_str(r#"{"authorId":1,"videoId":"2","text":"great riff"}"#).unwrap();
        let comment: NewComment = validated(body).unwrap().into();
        assert_eq!(comment.video_id, 2);
        assert_eq!(comment.parent_id, None);

        let body: CommentBody = serde_json::from_str(
            r#"{"authorId":1,"videoId":2,"text":"agreed","parentId":5}"#,
        )
        .unwrap();
        assert_eq!(body.parent_id, Some(5));

        let body: CommentBody =
            serde_json::from_str(r#"{"authorId":1,"videoId":2,"text":"no"}"#).unwrap();
        assert!(validated(body).is_err());
    }

    #[test]
    fn search_prefers_title_and_requires_one() {
        let query = VideoSearchQuery {
            title: Some("shook".into()),
            description: Some("rock".into()),
        };
        assert_eq!(query.criterion().unwrap(), VideoSearch::Title("shook".into()));

        let query = VideoSearchQuery {
            title: None,
            description: Some("alternative".into()),
        };
        assert_eq!(
            query.criterion().unwrap(),
            VideoSearch::Description("alternative".into())
        );

        let query = VideoSearchQuery {
            title: None,
            description: None,
        };
        assert!(matches!(query.criterion(), Err(AppError::Validation(_))));
    }

    #[test]
    fn search_terms_have_length_bounds() {
        let query = VideoSearchQuery {
            title: Some("ab".into()),
            description: None,
        };
        assert!(validated(query).is_err());
    }

    #[test]
    fn path_schemas_validate() {
        assert!(validated(NickPath { nick: "sIkari".into() }).is_ok());
        assert!(validated(NickPath { nick: "ab".into() }).is_err());
        assert!(validated(EmailPath { email: "misato@nerv.net".into() }).is_ok());
        assert!(validated(EmailPath { email: "nope".into() }).is_err());
        assert!(validated(UrlPath { url: "Lo2qQmj0_h4".into() }).is_ok());
        assert!(validated(UrlPath { url: "short".into() }).is_err());
    }
}
