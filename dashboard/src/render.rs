//! HTML Rendering
//!
//! Turns the fetched history into a single self-contained HTML page. All
//! cell content passes through `escape_html`; the agent loop records raw
//! user text and model output, neither of which is trusted markup.

use crate::db::TurnRecord;

const CSS: &str = r"
:root {
  --bg: #f4f6ef;
  --paper: #fffef9;
  --ink: #1f2a1f;
  --accent: #2d6a4f;
  --muted: #6b7c68;
}
body { font-family: 'IBM Plex Sans', 'Segoe UI', sans-serif; margin: 0; background: linear-gradient(160deg, var(--bg), #e6ede0); color: var(--ink); }
main { max-width: 1100px; margin: 24px auto; padding: 0 16px; }
.card { background: var(--paper); border-radius: 12px; box-shadow: 0 6px 24px rgba(31,42,31,.09); padding: 16px; }
h1 { margin: 0 0 8px 0; }
small { color: var(--muted); }
table { width: 100%; border-collapse: collapse; font-size: 14px; }
th, td { text-align: left; border-bottom: 1px solid #d8e1d3; padding: 8px; vertical-align: top; }
th { color: var(--accent); }
pre { white-space: pre-wrap; margin: 0; font-family: 'IBM Plex Mono', monospace; }
";

/// Escape text for embedding in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn cell(value: Option<&str>) -> String {
    format!("<td>{}</td>", escape_html(value.unwrap_or_default()))
}

fn pre_cell(value: Option<&str>) -> String {
    format!("<td><pre>{}</pre></td>", escape_html(value.unwrap_or_default()))
}

fn table_rows(turns: &[TurnRecord]) -> String {
    if turns.is_empty() {
        return "<tr><td colspan=\"7\">No turns recorded yet.</td></tr>".to_string();
    }

    turns
        .iter()
        .map(|turn| {
            format!(
                "<tr>{}{}{}{}{}{}{}</tr>",
                cell(turn.ts.as_deref()),
                cell(turn.input_type.as_deref()),
                pre_cell(turn.user_text.as_deref()),
                pre_cell(turn.asr_text.as_deref()),
                pre_cell(turn.telegram_reply.as_deref()),
                pre_cell(turn.voice_reply.as_deref()),
                cell(turn.status.as_deref()),
            )
        })
        .collect()
}

/// Render the full dashboard page.
#[must_use]
pub fn render_page(turns: &[TurnRecord], rendered_at: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Relay Dashboard</title>
    <style>{CSS}</style>
  </head>
  <body>
    <main>
      <div class="card">
        <h1>Relay</h1>
        <small>Last {count} turns from SQLite | Rendered at {rendered_at}</small>
      </div>
      <div class="card" style="margin-top:16px">
        <table>
          <thead>
            <tr>
              <th>Timestamp</th>
              <th>Input</th>
              <th>User Text</th>
              <th>ASR Text</th>
              <th>Telegram Reply</th>
              <th>Voice Reply</th>
              <th>Status</th>
            </tr>
          </thead>
          <tbody>
            {rows}
          </tbody>
        </table>
      </div>
    </main>
  </body>
</html>
"#,
        count = turns.len(),
        rows = table_rows(turns),
    )
}
