use axum::extract::Request;
use axum::http::Method;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::interface_adapters::browser::TOKEN_COOKIE;
use crate::use_cases::route_guard::{self, GuardDecision};

// Edge check that runs before any handler. It only sees what the request
// carries (cookie or Authorization header); the dashboard handler still
// validates the token against the API.
pub async fn route_guard(request: Request, next: Next) -> Response {
    let decision = {
        let jar = CookieJar::from_headers(request.headers());
        let cookie = jar.get(TOKEN_COOKIE).map(|cookie| cookie.value());
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = route_guard::resolve_token(cookie, authorization);
        route_guard::decide(request.uri().path(), token)
    };

    match decision {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Redirect(entry) => {
            tracing::debug!(
                path = %request.uri().path(),
                target = entry.path(),
                "route guard redirect"
            );
            // 307 replays the method; form posts must land on the GET page.
            let method = request.method();
            if method == Method::GET || method == Method::HEAD {
                Redirect::temporary(entry.path()).into_response()
            } else {
                Redirect::to(entry.path()).into_response()
            }
        }
    }
}
