/// Cookie the anti-forgery token is read from
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header the anti-forgery token is sent in
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Read a cookie value out of a `document.cookie` style string
/// (`name=value; other=value`), percent-decoding it.
///
/// Returns `None` when the cookie is absent. A value that is not valid
/// percent-encoded UTF-8 is returned as-is.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}
