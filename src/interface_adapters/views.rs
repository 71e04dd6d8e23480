// Minimal server-rendered pages for the entry forms and the dashboard.

use axum::response::Html;

use crate::domain::entities::{Provider, User};
use crate::domain::errors::FormErrors;

pub fn login_page(error: Option<&str>, fields: Option<&FormErrors>, email: &str) -> Html<String> {
    let providers: String = Provider::ALL
        .iter()
        .map(|provider| {
            format!(
                r#"<a class="provider" href="/auth/{}/login">Continue with {}</a>"#,
                provider.slug(),
                provider.label()
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Login</h1>{error}
<form method="post" action="/login">
{email_input}
{password_input}
<button type="submit">Login</button>
</form>
<p>Or</p>
{providers}
<p><a href="/signup">Create an account</a></p>"#,
        error = error_banner(error),
        email_input = input("Email", "email", "email", email, fields),
        password_input = input("Password", "password", "password", "", fields),
    );
    page("Login", &body)
}

pub fn signup_page(error: Option<&str>, fields: Option<&FormErrors>, email: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Sign Up</h1>{error}
<form method="post" action="/signup">
{email}
{confirm_email}
{password}
{confirm_password}
<button type="submit">Sign Up</button>
</form>
<p><a href="/login">Already have an account?</a></p>"#,
        error = error_banner(error),
        email = input("Email", "email", "email", email, fields),
        confirm_email = input("Confirm Email", "confirm_email", "email", "", fields),
        password = input("Password", "password", "password", "", fields),
        confirm_password = input("Confirm Password", "confirm_password", "password", "", fields),
    );
    page("Sign Up", &body)
}

pub fn dashboard_page(user: &User) -> Html<String> {
    let body = format!(
        r#"<h1>Dashboard</h1>
<form method="post" action="/logout"><button type="submit">Logout</button></form>
<p><strong>Email:</strong> {email}</p>
<p><strong>User ID:</strong> {id}</p>"#,
        email = escape(&user.email),
        id = escape(&user.id),
    );
    page("Dashboard", &body)
}

// Turns a provider failure marker from the query string into a sentence.
pub fn login_error_message(marker: &str) -> String {
    Provider::ALL
        .into_iter()
        .find(|provider| provider.error_marker() == marker)
        .map(|provider| format!("{} sign-in failed. Please try again.", provider.label()))
        .unwrap_or_else(|| marker.to_string())
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{body}\n</body></html>\n",
        escape(title)
    ))
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn input(label: &str, name: &str, kind: &str, value: &str, fields: Option<&FormErrors>) -> String {
    let hint = fields
        .and_then(|fields| fields.get(name))
        .map(|message| format!(r#"<small class="error">{}</small>"#, escape(message)))
        .unwrap_or_default();
    format!(
        r#"<label>{label}: <input type="{kind}" name="{name}" value="{value}" required></label>{hint}"#,
        value = escape(value),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_marker_names_a_provider_then_message_is_readable() {
        assert_eq!(
            login_error_message("GitHubAuthFailed"),
            "GitHub sign-in failed. Please try again."
        );
        assert_eq!(login_error_message("Something"), "Something");
    }

    #[test]
    fn when_values_contain_markup_then_they_are_escaped() {
        let html = login_page(Some("<script>"), None, "a\"b").0;
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("value=\"a&quot;b\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn when_field_has_error_then_hint_is_rendered() {
        let mut fields = FormErrors::default();
        fields.push("confirm_password", "Passwords do not match");

        let html = signup_page(None, Some(&fields), "").0;

        assert!(html.contains("Passwords do not match"));
    }

    #[test]
    fn when_dashboard_renders_then_user_details_are_shown() {
        let html = dashboard_page(&User {
            id: "42".to_string(),
            email: "pilot@example.com".to_string(),
        })
        .0;
        assert!(html.contains("pilot@example.com"));
        assert!(html.contains("42"));
        assert!(html.contains("action=\"/logout\""));
    }
}
