//! Server-side HTML rendering.
//!
//! Every function here is pure: it takes the records to show and returns markup.

use birthdays_core::birthdays::Birthday;
use birthdays_core::constants::MAX_NAME_LENGTH;

use crate::turbo::BIRTHDAYS_TARGET;

const TURBO_SCRIPT: &str =
    "https://cdn.jsdelivr.net/npm/@hotwired/turbo@8.0.4/dist/turbo.es2017-esm.js";

/// Id of the frame that lazily loads the birthday list.
pub const LIST_FRAME_ID: &str = "birthday-list";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// DOM id of a birthday's row, used as the target of `remove` streams.
pub fn row_dom_id(birthday_id: i32) -> String {
    format!("birthday-{}", birthday_id)
}

/// Full page: entry form, lazily loaded list and the live-update subscription.
pub fn home_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Birthdays</title>
  <script type="module" src="{script}"></script>
</head>
<body>
  <h1>Birthdays</h1>
  <turbo-stream-source src="/stream"></turbo-stream-source>
  <form method="post" action="/">
    <label>Name <input type="text" name="name" maxlength="{max_name}" required></label>
    <label>Date <input type="date" name="date" required></label>
    <button type="submit">Add</button>
  </form>
  <turbo-frame id="{frame}" src="/birthdays"></turbo-frame>
</body>
</html>
"#,
        script = TURBO_SCRIPT,
        max_name = MAX_NAME_LENGTH,
        frame = LIST_FRAME_ID,
    )
}

/// Fragment listing the given birthdays inside the list frame.
pub fn birthday_list(birthdays: &[Birthday]) -> String {
    let rows: String = birthdays.iter().map(birthday_row).collect();
    format!(
        r#"<turbo-frame id="{frame}"><ul id="{list}">{rows}</ul></turbo-frame>"#,
        frame = LIST_FRAME_ID,
        list = BIRTHDAYS_TARGET,
        rows = rows,
    )
}

pub fn birthday_row(birthday: &Birthday) -> String {
    let date = birthday.calendar_date().to_string();
    format!(
        r#"<li id="{dom_id}"><span class="name">{name}</span> <time datetime="{date}">{date}</time> <a href="/delete/{id}" data-turbo-method="delete">Delete</a></li>"#,
        dom_id = row_dom_id(birthday.id),
        name = escape_html(&birthday.name),
        date = date,
        id = birthday.id,
    )
}
