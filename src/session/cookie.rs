//! Cookie string parsing.

/// Plain NextAuth session cookie name (served over http).
pub const SESSION_COOKIE: &str = "next-auth.session-token";
/// NextAuth session cookie name used on https origins.
pub const SECURE_SESSION_COOKIE: &str = "__Secure-next-auth.session-token";

/// Ordered name/value pairs. Inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieMap(Vec<(String, String)>);

impl CookieMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn split_pair(segment: &str) -> Option<(&str, &str)> {
    segment
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Parse a cookie header, a single `name=value` pair, or a bare session token.
///
/// A bare token is stored under both NextAuth cookie names so either form of
/// the web app accepts it.
pub fn parse_cookie_input(input: &str) -> CookieMap {
    let input = input.trim();
    let mut cookies = CookieMap::new();
    if input.is_empty() {
        return cookies;
    }

    if input.contains('=') && input.contains(';') {
        for segment in input.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            if let Some((key, value)) = split_pair(segment) {
                cookies.insert(key, value);
            }
        }
        return cookies;
    }

    if let Some((key, value)) = split_pair(input) {
        cookies.insert(key, value);
        return cookies;
    }

    cookies.insert(SESSION_COOKIE, input);
    cookies.insert(SECURE_SESSION_COOKIE, input);
    cookies
}
