use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::{
    db::OrmConn,
    dto::users::{UpdateAvatarRequest, UpdateUserRequest, UserResponse},
    entity::{Users, users},
    error::{AppError, AppResult},
};

pub async fn get_user(db: &OrmConn, id: i64) -> AppResult<UserResponse> {
    let user = Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok(UserResponse {
        message: None,
        user: user.into(),
    })
}

pub async fn update_user(
    db: &OrmConn,
    id: i64,
    payload: UpdateUserRequest,
) -> AppResult<UserResponse> {
    let user = Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if let Some(username) = payload.username.as_ref().filter(|u| **u != user.username) {
        let taken = Users::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .count(db)
            .await?
            > 0;
        if taken {
            return Err(AppError::Conflict("Username is already taken".into()));
        }
    }

    if let Some(email) = payload.email.as_ref().filter(|e| **e != user.email) {
        let taken = Users::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .count(db)
            .await?
            > 0;
        if taken {
            return Err(AppError::Conflict("Email is already taken".into()));
        }
    }

    let mut active: users::ActiveModel = user.into();
    if let Some(username) = payload.username.filter(|s| !s.is_empty()) {
        active.username = Set(username);
    }
    if let Some(email) = payload.email.filter(|s| !s.is_empty()) {
        active.email = Set(email);
    }
    if let Some(first_name) = payload.first_name.filter(|s| !s.is_empty()) {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name.filter(|s| !s.is_empty()) {
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone.filter(|s| !s.is_empty()) {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address.filter(|s| !s.is_empty()) {
        active.address = Set(Some(address));
    }
    active.updated_at = Set(Utc::now().into());

    let user = active.update(db).await?;

    Ok(UserResponse {
        message: Some("User updated successfully".into()),
        user: user.into(),
    })
}

pub async fn update_avatar(
    db: &OrmConn,
    id: i64,
    payload: UpdateAvatarRequest,
) -> AppResult<UserResponse> {
    let avatar = payload
        .avatar
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation("Avatar data is required".into()))?;

    let user = Users::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let mut active: users::ActiveModel = user.into();
    active.avatar = Set(Some(avatar));
    active.updated_at = Set(Utc::now().into());
    let user = active.update(db).await?;

    Ok(UserResponse {
        message: Some("Avatar updated successfully".into()),
        user: user.into(),
    })
}
