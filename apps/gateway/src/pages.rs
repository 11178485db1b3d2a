//! HTML bodies served by the gateway.
//!
//! Bodies are small fixed fragments; the only dynamic value is the session
//! subject, which is escaped before rendering.

pub const UNAUTHORIZED: &str = "Unauthorized - Please login <br><a href=\"login\"> Login </a>";

pub const LANDING: &str = concat!(
    "Welcome - Please login <br>",
    "<a href=\"login\"> Login </a> <br>",
    "<a href=\"profile?page=page2\"> URL Parameters page 2 - Protected </a> <br>",
    "<a href=\"profile\"> Profile - Protected </a> <br>",
);

pub const ALTERNATE_PAGE: &str = "PAGE 2 <br><a href=\"logout\"> Logout </a>";

pub const LOGGED_OUT: &str = "Logged out <br><a href=\"login\"> Login </a>";

/// Default profile view for an authenticated subject.
pub fn profile(subject: &str) -> String {
    format!(
        "Hello {} <br><a href=\"logout\"> Logout </a>",
        escape_html(subject)
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
