use crate::auth::config::AdminConfig;
use crate::auth::models::AdminUser;
use crate::error::AppError;

/// Name of the http-only session cookie.
pub const SESSION_COOKIE: &str = "vetrina_session";

/// Validate submitted credentials against the configured operator account.
///
/// The returned error message is exactly what the sign-in form displays
/// inline on failure.
pub fn authenticate(
    config: &AdminConfig,
    email: &str,
    password: &str,
) -> Result<AdminUser, AppError> {
    if config.verify(email, password) {
        Ok(AdminUser {
            email: email.to_string(),
        })
    } else {
        Err(AppError::Auth("Invalid email or password".into()))
    }
}

/// Build the session cookie carrying the serialized user.
#[cfg(feature = "ssr")]
pub fn session_cookie(
    user: &AdminUser,
) -> Result<axum_extra::extract::cookie::Cookie<'static>, AppError> {
    let user_json = serde_json::to_string(user)
        .map_err(|e| AppError::Internal(format!("Failed to serialize user: {}", e)))?;

    Ok(
        axum_extra::extract::cookie::Cookie::build((SESSION_COOKIE, user_json))
            .path("/")
            .http_only(true)
            .same_site(axum_extra::extract::cookie::SameSite::Lax)
            .max_age(time::Duration::hours(12))
            .build(),
    )
}

/// Read the current session back out of the cookie jar.
#[cfg(feature = "ssr")]
pub fn session_from_jar(jar: &axum_extra::extract::CookieJar) -> Result<AdminUser, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Auth("Not signed in".into()))?;

    serde_json::from_str(cookie.value())
        .map_err(|e| AppError::Auth(format!("Invalid session: {}", e)))
}

/// `POST /api/auth/login` — Operator login handler.
///
/// Validates credentials against the configured account. On success, sets
/// the session cookie and returns the user info.
#[cfg(feature = "ssr")]
pub async fn login_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
    axum::Json(req): axum::Json<crate::auth::models::LoginRequest>,
) -> Result<
    (
        axum_extra::extract::CookieJar,
        axum::Json<crate::auth::models::LoginResponse>,
    ),
    AppError,
> {
    let user = authenticate(&state.admin, &req.email, &req.password)?;
    let jar = jar.add(session_cookie(&user)?);

    Ok((
        jar,
        axum::Json(crate::auth::models::LoginResponse {
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

/// `GET /api/auth/me` — Returns the current operator from the cookie.
#[cfg(feature = "ssr")]
pub async fn me_handler(
    jar: axum_extra::extract::CookieJar,
) -> Result<axum::Json<AdminUser>, AppError> {
    let user = session_from_jar(&jar)?;
    Ok(axum::Json(user))
}

/// `POST /api/auth/logout` — Clears the session cookie.
#[cfg(feature = "ssr")]
pub async fn logout_handler(
    jar: axum_extra::extract::CookieJar,
) -> axum_extra::extract::CookieJar {
    let cookie = axum_extra::extract::cookie::Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .build();

    jar.remove(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::sha256_hex;

    fn test_config() -> AdminConfig {
        AdminConfig::new("admin@vetrina.test".to_string(), sha256_hex("correct-horse"))
    }

    #[test]
    fn test_authenticate_success() {
        let user = authenticate(&test_config(), "admin@vetrina.test", "correct-horse").unwrap();
        assert_eq!(user.email, "admin@vetrina.test");
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let result = authenticate(&test_config(), "admin@vetrina.test", "battery-staple");
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Authentication error: Invalid email or password"
        );
    }

    #[test]
    fn test_authenticate_unknown_email() {
        let result = authenticate(&test_config(), "nobody@vetrina.test", "correct-horse");
        assert!(result.is_err());
    }
}
