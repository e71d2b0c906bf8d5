use super::{banner, escape, layout};
use crate::services::DrawingView;

fn nav(username: Option<&str>) -> String {
    match username {
        Some(user) => format!(
            "<nav><a href=\"/studio\">Studio</a> <a href=\"/profile\">My drawings</a> <span>{}</span> <a href=\"/logout\">Log out</a></nav>",
            escape(user)
        ),
        None => "<nav><a href=\"/login\">Log in</a> <a href=\"/register\">Register</a></nav>".to_string(),
    }
}

pub fn landing_page() -> String {
    let body = format!(
        "{}\n<h1>Sketch studio</h1>\n<p>Draw on a canvas, save your sketches and come back to them later.</p>",
        nav(None)
    );
    layout("Sketch studio", &body)
}

pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"{nav}
<h1>Register</h1>
{error}
<form method="post" action="/register">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<label>Confirm password <input name="confirm_password" type="password" required></label>
<button type="submit">Register</button>
</form>"#,
        nav = nav(None),
        error = banner("error", error),
    );
    layout("Register", &body)
}

pub fn login_page(notice: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        r#"{nav}
<h1>Log in</h1>
{notice}{error}
<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>"#,
        nav = nav(None),
        notice = banner("notice", notice),
        error = banner("error", error),
    );
    layout("Log in", &body)
}

/// Canvas page, optionally preloaded with an existing drawing
pub fn canvas_page(username: &str, drawing: Option<&DrawingView>) -> String {
    let (id, title, image) = match drawing {
        Some(d) => (d.id.to_string(), escape(&d.title), escape(&d.image_data)),
        None => (String::new(), String::new(), String::new()),
    };

    let body = format!(
        r#"{nav}
<h1>Studio</h1>
<input id="title" placeholder="Untitled" value="{title}">
<canvas id="canvas" width="800" height="600" data-drawing-id="{id}" data-image="{image}"></canvas>
<button id="save">Save</button>
<script>
const canvas = document.getElementById('canvas');
const ctx = canvas.getContext('2d');
if (canvas.dataset.image) {{
  const img = new Image();
  img.onload = () => ctx.drawImage(img, 0, 0);
  img.src = canvas.dataset.image;
}}
let drawing = false;
canvas.addEventListener('mousedown', e => {{ drawing = true; ctx.beginPath(); ctx.moveTo(e.offsetX, e.offsetY); }});
canvas.addEventListener('mousemove', e => {{ if (drawing) {{ ctx.lineTo(e.offsetX, e.offsetY); ctx.stroke(); }} }});
window.addEventListener('mouseup', () => drawing = false);
document.getElementById('save').addEventListener('click', async () => {{
  const id = canvas.dataset.drawingId;
  const body = JSON.stringify({{ title: document.getElementById('title').value, imageData: canvas.toDataURL('image/png') }});
  const res = await fetch(id ? '/api/drawings/' + id : '/api/save_drawing', {{
    method: id ? 'PUT' : 'POST', headers: {{ 'Content-Type': 'application/json' }}, body
  }});
  const data = await res.json();
  if (res.ok && data.drawingId) canvas.dataset.drawingId = data.drawingId;
  alert(data.message || data.error);
}});
</script>"#,
        nav = nav(Some(username)),
    );
    layout("Studio", &body)
}

pub fn profile_page(username: &str, drawings: &[DrawingView]) -> String {
    let items: String = if drawings.is_empty() {
        "<p>No drawings yet. <a href=\"/studio\">Start one</a>.</p>".to_string()
    } else {
        let cards: String = drawings
            .iter()
            .map(|d| {
                format!(
                    "<li><a href=\"/studio/{id}\"><img src=\"{image}\" alt=\"{title}\" width=\"200\"></a><h2>{title}</h2><time>{created}</time></li>",
                    id = d.id,
                    image = escape(&d.image_data),
                    title = escape(&d.title),
                    created = escape(&d.created_at),
                )
            })
            .collect();
        format!("<ul class=\"drawings\">{}</ul>", cards)
    };

    let body = format!(
        "{}\n<h1>{}'s drawings</h1>\n{}",
        nav(Some(username)),
        escape(username),
        items
    );
    layout("My drawings", &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        "<h1>Not found</h1>\n<p>That drawing does not exist.</p>\n<p><a href=\"/profile\">Back to my drawings</a></p>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_lists_each_drawing() {
        let drawings = vec![
            DrawingView {
                id: 2,
                title: "<b>sun</b>".into(),
                image_data: "data:image/png;base64,AAAA".into(),
                created_at: "2024-01-01 10:00:00".into(),
            },
            DrawingView {
                id: 1,
                title: "moon".into(),
                image_data: "data:image/png;base64,BBBB".into(),
                created_at: "2024-01-01 09:00:00".into(),
            },
        ];
        let html = profile_page("alice", &drawings);
        assert!(html.contains("href=\"/studio/2\""));
        assert!(html.contains("href=\"/studio/1\""));
        assert!(html.contains("&lt;b&gt;sun&lt;/b&gt;"));
        assert!(html.find("/studio/2").unwrap() < html.find("/studio/1").unwrap());
    }

    #[test]
    fn canvas_preloads_existing_drawing() {
        let view = DrawingView {
            id: 5,
            title: "tree".into(),
            image_data: "data:image/png;base64,CCCC".into(),
            created_at: String::new(),
        };
        let html = canvas_page("alice", Some(&view));
        assert!(html.contains("data-drawing-id=\"5\""));
        assert!(html.contains("value=\"tree\""));
    }
}
