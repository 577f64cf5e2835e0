//! URLs shared between front- and backend
//!
//! for consistency, all endpoint urls in this module always start with a /

/// Prefix under which the console server forwards requests to the REST backend
pub const API_BASE_URL: &str = "/api";
/// Prefix under which the console server forwards requests for uploaded media
///
/// Media paths returned by the backend (e.g. `/uploads/abc.jpg`) are appended to this.
pub const MEDIA_BASE_URL: &str = "/media";

/// Exchange credentials for a bearer token
pub const LOGIN_ENDPOINT: &str = "/auth/login";
/// Listing of all registered users
pub const USERS_ENDPOINT: &str = "/auth/users";

pub const ABOUT_ENDPOINT: &str = "/about";
pub const BLOG_ENDPOINT: &str = "/blogs";
pub const PRICING_ENDPOINT: &str = "/pricing";
pub const SPORTS_ENDPOINT: &str = "/sports";
pub const CENTERS_ENDPOINT: &str = "/centers";
pub const PROGRAMS_ENDPOINT: &str = "/programs";
pub const SERVICES_ENDPOINT: &str = "/services";
pub const USER_STORIES_ENDPOINT: &str = "/userstories";

/// Join a base url and a path, making sure exactly one / sits between them
pub fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
