use maud::{Markup, html};

use crate::HTMX_PATH;

pub const DEFAULT_INDEX_TITLE: &str = "Stableford Leaderboard";

/// Page shell. The table itself is loaded from `/leaderboard` and refreshed
/// by htmx every few seconds.
#[must_use]
pub fn render_index_template(title: &str, refresh_seconds: u32) -> Markup {
    html! {
        (maud::DOCTYPE)
        head{
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (title) }
            script src=(HTMX_PATH) defer {}
            style { (STYLES) }
        }
        body {
            h1 { (title) }
            div id="leaderboard"
                hx-get="leaderboard"
                hx-trigger=(format!("load, every {refresh_seconds}s"))
                hx-swap="innerHTML" {
                p class="htmx-indicator" { "Loading scores..." }
            }
        }
    }
}

const STYLES: &str = "body{font-family:Arial,sans-serif;background:#f4f7fa;margin:0;padding:20px}\
h1{color:#2E7D32}\
table{border-collapse:collapse;width:100%;max-width:700px;background:#fff}\
th{border-bottom:2px solid #ddd;padding:10px;text-align:left;background:#f8f9fa}\
td{padding:10px;border-bottom:1px solid #ddd}";
