use crate::domain::entities::EntryPoint;

// How the edge treats a request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    AuthOnly,
    Unguarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    Redirect(EntryPoint),
}

pub fn classify(path: &str) -> RouteClass {
    if within(path, EntryPoint::Dashboard.path()) {
        RouteClass::Protected
    } else if within(path, EntryPoint::Login.path()) || within(path, EntryPoint::Signup.path()) {
        RouteClass::AuthOnly
    } else {
        RouteClass::Unguarded
    }
}

// Cookie wins; the header is only consulted when the cookie is missing or empty.
pub fn resolve_token<'a>(
    cookie: Option<&'a str>,
    authorization: Option<&'a str>,
) -> Option<&'a str> {
    non_empty(cookie).or_else(|| authorization.and_then(bearer_token))
}

// Strips an optional `Bearer ` prefix from an Authorization value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => header,
    };
    non_empty(Some(token))
}

// Token presence only; validity is checked later by the session controller.
pub fn decide(path: &str, token: Option<&str>) -> GuardDecision {
    let has_token = non_empty(token).is_some();
    match classify(path) {
        RouteClass::Protected if !has_token => GuardDecision::Redirect(EntryPoint::Login),
        RouteClass::AuthOnly if has_token => GuardDecision::Redirect(EntryPoint::Dashboard),
        _ => GuardDecision::Pass,
    }
}

// `/dashboard` matches `/dashboard` and `/dashboard/...`, not `/dashboards`.
fn within(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
