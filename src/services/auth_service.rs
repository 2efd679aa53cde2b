use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::{
    db::OrmConn,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    entity::{Users, users},
    error::{AppError, AppResult},
    token,
};

pub async fn register_user(db: &OrmConn, payload: RegisterRequest) -> AppResult<RegisterResponse> {
    let input = payload.validate()?;

    let username_taken = Users::find()
        .filter(users::Column::Username.eq(input.username.as_str()))
        .one(db)
        .await?
        .is_some();
    if username_taken {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let email_taken = Users::find()
        .filter(users::Column::Email.eq(input.email.as_str()))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let password_hash = hash_password(&input.password)?;

    let user = users::ActiveModel {
        id: NotSet,
        username: Set(input.username),
        email: Set(input.email),
        password_hash: Set(password_hash),
        role: Set(input.role),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        phone: Set(input.phone),
        address: Set(input.address),
        avatar: Set(input.avatar),
        shop_id: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(db)
    .await
    .map_err(|err| match err.sql_err() {
        // The check above races with concurrent registrations; the unique
        // indexes are the backstop.
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("User already exists".into())
        }
        _ => AppError::OrmError(err),
    })?;

    tracing::info!(user_id = user.id, "user registered");

    Ok(RegisterResponse {
        message: "User registered successfully".into(),
        user: user.into(),
    })
}

pub async fn login_user(db: &OrmConn, payload: LoginRequest) -> AppResult<LoginResponse> {
    let email = payload.email.trim();
    let password = payload.password.trim();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".into(),
        ));
    }

    // One message for both failure modes: don't reveal whether the email exists.
    let invalid = || AppError::Unauthenticated("Invalid email or password".into());

    let user = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid());
    }

    let token = token::issue(user.id, &user.username);

    tracing::info!(user_id = user.id, "user logged in");

    Ok(LoginResponse {
        message: "Login successful".into(),
        token,
        user: user.into(),
    })
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}
