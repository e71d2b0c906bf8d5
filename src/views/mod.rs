//! Minimal server-rendered pages. All user-supplied text goes through [`escape`].

pub mod generator;
pub mod studio;

/// HTML-escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body in the shared document shell
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// Human text for a `?notice=` code
pub fn notice_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        "login_required" => Some("Please log in to access this page."),
        "logged_out" => Some("You have been logged out."),
        _ => None,
    }
}

fn banner(class: &str, message: Option<&str>) -> String {
    match message {
        Some(m) => format!("<p class=\"{}\">{}</p>", class, escape(m)),
        None => String::new(),
    }
}
