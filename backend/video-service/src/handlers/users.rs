/// User handlers - HTTP endpoints under `/users`
use crate::db::user_repo;
use crate::error::Result;
use crate::models::NewUser;
use crate::validation::schemas::{EmailPath, IdPath, NickPath, UserBody};
use crate::validation::validated;
use actix_web::{delete, get, post, put, web, HttpResponse};
use sqlx::PgPool;

/// List all users with their videos and comments
/// GET /users
#[get("")]
async fn list_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let users = user_repo::find_all_users(&pool).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/id/{id}
#[get("/id/{id}")]
async fn get_user_by_id(pool: web::Data<PgPool>, path: web::Path<IdPath>) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let user = user_repo::find_user_by_id(&pool, id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /users/nick/{nick}
#[get("/nick/{nick}")]
async fn get_user_by_nick(
    pool: web::Data<PgPool>,
    path: web::Path<NickPath>,
) -> Result<HttpResponse> {
    let NickPath { nick } = validated(path.into_inner())?;
    let user = user_repo::find_user_by_nick(&pool, &nick).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /users/email/{email}
#[get("/email/{email}")]
async fn get_user_by_email(
    pool: web::Data<PgPool>,
    path: web::Path<EmailPath>,
) -> Result<HttpResponse> {
    let EmailPath { email } = validated(path.into_inner())?;
    let user = user_repo::find_user_by_email(&pool, &email).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// POST /users
#[post("")]
async fn create_user(pool: web::Data<PgPool>, body: web::Json<UserBody>) -> Result<HttpResponse> {
    let user: NewUser = validated(body.into_inner())?.into();
    let created = user_repo::create_user(&pool, &user).await?;

    tracing::info!(user_id = created.user_id, nick = %created.nick, "User created");
    Ok(HttpResponse::Ok().json(created))
}

/// PUT /users/id/{id}
#[put("/id/{id}")]
async fn update_user_by_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
    body: web::Json<UserBody>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let user: NewUser = validated(body.into_inner())?.into();
    let updated = user_repo::update_user_by_id(&pool, id, &user).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /users/nick/{nick}
#[put("/nick/{nick}")]
async fn update_user_by_nick(
    pool: web::Data<PgPool>,
    path: web::Path<NickPath>,
    body: web::Json<UserBody>,
) -> Result<HttpResponse> {
    let NickPath { nick } = validated(path.into_inner())?;
    let user: NewUser = validated(body.into_inner())?.into();
    let updated = user_repo::update_user_by_nick(&pool, &nick, &user).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /users/id/{id}
#[delete("/id/{id}")]
async fn delete_user_by_id(
    pool: web::Data<PgPool>,
    path: web::Path<IdPath>,
) -> Result<HttpResponse> {
    let IdPath { id } = validated(path.into_inner())?;
    let deleted = user_repo::delete_user_by_id(&pool, id).await?;

    tracing::info!(user_id = deleted.user_id, "User deleted");
    Ok(HttpResponse::Ok().json(deleted))
}

/// DELETE /users/nick/{nick}
#[delete("/nick/{nick}")]
async fn delete_user_by_nick(
    pool: web::Data<PgPool>,
    path: web::Path<NickPath>,
) -> Result<HttpResponse> {
    let NickPath { nick } = validated(path.into_inner())?;
    let deleted = user_repo::delete_user_by_nick(&pool, &nick).await?;

    tracing::info!(user_id = deleted.user_id, "User deleted");
    Ok(HttpResponse::Ok().json(deleted))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user_by_id)
        .service(get_user_by_nick)
        .service(get_user_by_email)
        .service(create_user)
        .service(update_user_by_id)
        .service(update_user_by_nick)
        .service(delete_user_by_id)
        .service(delete_user_by_nick);
}
