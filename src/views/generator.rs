use super::{banner, escape, layout};
use crate::services::Complexity;

/// What the generator page shows below the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorOutcome {
    Nothing,
    Passwords(Vec<String>),
    /// Single entry shown in place of the list
    Error(String),
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form method="post" action="{action}">
<label>Login <input name="login" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">{submit}</button>
</form>"#
    )
}

pub fn register_page(notice: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        "<h1>Create an account</h1>\n{}{}\n{}\n<p>Already registered? <a href=\"/login\">Log in</a></p>",
        banner("notice", notice),
        banner("error", error),
        credentials_form("/", "Register"),
    );
    layout("Register", &body)
}

pub fn login_page(notice: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}{}\n{}\n<p>No account yet? <a href=\"/\">Register</a></p>",
        banner("notice", notice),
        banner("error", error),
        credentials_form("/login", "Log in"),
    );
    layout("Log in", &body)
}

pub fn generator_page(username: &str, outcome: &GeneratorOutcome) -> String {
    let options: String = Complexity::ALL
        .iter()
        .map(|c| format!("<option value=\"{0}\">{0}</option>", c))
        .collect();

    let results = match outcome {
        GeneratorOutcome::Nothing => String::new(),
        GeneratorOutcome::Passwords(passwords) => {
            let items: String = passwords
                .iter()
                .map(|p| format!("<li><code>{}</code></li>", escape(p)))
                .collect();
            format!("<ul class=\"passwords\">{}</ul>", items)
        }
        GeneratorOutcome::Error(message) => {
            format!("<ul class=\"passwords\"><li class=\"error\">{}</li></ul>", escape(message))
        }
    };

    let body = format!(
        r#"<h1>Password generator</h1>
<p>Signed in as <strong>{user}</strong> &middot; <a href="/logout">Log out</a></p>
<form method="post" action="/generator">
<label>Length <input name="length" value="12"></label>
<label>Count <input name="count" value="1"></label>
<label>Complexity <select name="complexity">{options}</select></label>
<button type="submit">Generate</button>
</form>
{results}"#,
        user = escape(username),
    );
    layout("Password generator", &body)
}
