//! One-shot flash notices carried in a cookie across a redirect.
//!
//! Set on the redirect response, read and cleared on the next home-page
//! render. The value is percent-encoded so arbitrary messages survive the
//! cookie grammar.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "parlo_flash";

/// Queue a notice for the next page render.
pub fn set_flash(jar: CookieJar, message: &str) -> CookieJar {
    let encoded = urlencoding::encode(message).into_owned();
    jar.add(
        Cookie::build((FLASH_COOKIE, encoded))
            .path("/")
            .http_only(true),
    )
}

/// Take the pending notice, clearing it from the response jar.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = urlencoding::decode(cookie.value())
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| cookie.value().to_owned());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, Some(message))
}
