use std::time::Duration;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const TOKEN_COOKIE: &str = "token";
pub const USER_NAME_COOKIE: &str = "user_name";

/// Reads a percent-decoded cookie value from the request's `Cookie` headers.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value_trimmed().to_string())
}

fn session_cookie(name: &'static str, value: &str, max_age: Duration) -> Cookie<'static> {
    let seconds = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    Cookie::build((name, value.to_string()))
        .path("/")
        .max_age(cookie::time::Duration::seconds(seconds))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build()
}

/// Adds both session cookies to `jar`.
pub fn with_session(
    jar: CookieJar,
    token: &str,
    user_name: Option<&str>,
    max_age: Duration,
) -> CookieJar {
    let jar = jar.add(session_cookie(TOKEN_COOKIE, token, max_age));
    match user_name {
        Some(name) => jar.add(session_cookie(USER_NAME_COOKIE, name, max_age)),
        None => jar,
    }
}

/// Expires both session cookies the request carried.
pub fn cleared(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(USER_NAME_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue};
    use axum::response::IntoResponse;

    use super::*;

    fn set_cookies(jar: CookieJar) -> Vec<String> {
        jar.into_response()
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    fn request_headers(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn test_read_finds_named_cookie() {
        let headers = request_headers("theme=dark; token=abc123; user_name=Ann%20Lee");
        assert_eq!(read(&headers, "token").as_deref(), Some("abc123"));
        assert_eq!(read(&headers, "user_name").as_deref(), Some("Ann Lee"));
        assert_eq!(read(&headers, "missing"), None);
    }

    #[test]
    fn test_read_strips_quotes() {
        let headers = request_headers("token=\"abc123\"");
        assert_eq!(read(&headers, "token").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookies_carry_attributes() {
        let jar = with_session(
            CookieJar::new(),
            "abc",
            Some("Ann Lee"),
            Duration::from_secs(7 * 24 * 60 * 60),
        );
        let values = set_cookies(jar);
        assert_eq!(values.len(), 2);

        let token = values.iter().find(|v| v.starts_with("token=abc;")).unwrap();
        assert!(token.contains("Max-Age=604800"));
        assert!(token.contains("HttpOnly"));
        assert!(token.contains("SameSite=Lax"));
        assert!(token.contains("Path=/"));
        assert!(values.iter().any(|v| v.starts_with("user_name=Ann%20Lee;")));
    }

    #[test]
    fn test_session_without_name_sets_token_only() {
        let values = set_cookies(with_session(
            CookieJar::new(),
            "abc",
            None,
            Duration::from_secs(60),
        ));
        assert_eq!(values.len(), 1);
        assert!(values[0].starts_with("token=abc;"));
    }

    #[test]
    fn test_cleared_cookies_expire_immediately() {
        let jar = CookieJar::from_headers(&request_headers("token=abc; user_name=Ann"));
        let values = set_cookies(cleared(jar));
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.contains("Max-Age=0")));
    }
}
