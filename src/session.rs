use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::request::{FromRequest, Outcome, Request};

pub const VIEWER_COOKIE: &str = "rabo_viewer";

// ── Visitor session request guard ──

/// Identifies the visitor whose viewer a request drives.
/// Issues a fresh private cookie when the request carries none.
pub struct ViewerSession(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ViewerSession {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(ViewerSession(session_id(request.cookies())))
    }
}

fn session_id(cookies: &CookieJar<'_>) -> String {
    if let Some(c) = cookies.get_private(VIEWER_COOKIE) {
        let id = c.value().trim();
        if !id.is_empty() {
            return id.to_string();
        }
    }
    let id = uuid::Uuid::new_v4().to_string();
    set_session_cookie(cookies, &id);
    id
}

fn set_session_cookie(cookies: &CookieJar<'_>, session_id: &str) {
    let mut cookie = Cookie::new(VIEWER_COOKIE, session_id.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookies.add_private(cookie);
}
