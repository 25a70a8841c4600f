use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::history::HistoryEntry;

const STYLE: &str = "body{font-family:sans-serif;max-width:640px;margin:2rem auto;padding:0 1rem;color:#222}\
h1{font-size:1.6rem}h2{font-size:1.2rem;margin-bottom:.4rem}\
figure{margin:0 0 2rem}img,video{max-width:100%;border-radius:4px}\
.empty{color:#666}";

/// Full HTML document for the "on this day" page of `date`.
pub fn render_history_page(date: NaiveDate, entries: &[HistoryEntry]) -> String {
    let title = encode_text(&format!("On this day: {}", date.format("%B %-d"))).into_owned();

    let body = if entries.is_empty() {
        "<p class=\"empty\">Nothing was posted on this day.</p>\n".to_string()
    } else {
        entries.iter().map(render_entry).collect()
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}

fn render_entry(entry: &HistoryEntry) -> String {
    let media = match (entry.video_url(), entry.image_url()) {
        (Some(url), _) => format!(
            "<video src=\"{}\" controls preload=\"metadata\"></video>",
            encode_double_quoted_attribute(url)
        ),
        (None, Some(url)) => format!(
            "<img src=\"{}\" alt=\"Post from {}\" loading=\"lazy\">",
            encode_double_quoted_attribute(url),
            entry.year
        ),
        (None, None) => String::new(),
    };

    format!("<figure>\n<h2>{}</h2>\n{media}\n</figure>\n", entry.year)
}
