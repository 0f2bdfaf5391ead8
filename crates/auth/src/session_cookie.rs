//! The `sessionToken` cookie shared by the client and server contexts.

use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};

use bizdash_core::RawToken;

pub const SESSION_COOKIE_NAME: &str = "sessionToken";

/// Cookie lifetime: seven days.
pub const SESSION_COOKIE_TTL: Duration = Duration::days(7);

/// Build the session cookie: `Path=/`, `Secure`, `SameSite=Strict`, 7 days.
pub fn session_cookie(token: &RawToken) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.as_str().to_string()))
        .path("/")
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(SESSION_COOKIE_TTL)
        .expires(OffsetDateTime::now_utc() + SESSION_COOKIE_TTL)
        .build()
}

/// A cookie that instructs the client to drop the session cookie.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .secure(true)
        .same_site(SameSite::Strict)
        .build();
    cookie.make_removal();
    cookie
}

/// `Set-Cookie` header value for `cookie`, percent-encoded.
pub fn set_cookie_header(cookie: &Cookie<'_>) -> String {
    cookie.encoded().to_string()
}
