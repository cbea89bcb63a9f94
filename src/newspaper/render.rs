//! Static HTML rendering of an edition.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

use super::edition::{Edition, StoryKind};

const STYLE: &str = "\
body { font-family: Georgia, serif; margin: 0 auto; max-width: 60rem; padding: 1rem; }
.theme-light body { background: #f7f3e8; color: #1a1a1a; }
.theme-dark body { background: #1b1b1b; color: #e8e4d8; }
header { text-align: center; border-bottom: 3px double currentColor; }
.breaking h2 { font-size: 2.4rem; margin-bottom: 0.2rem; }
.standing li { display: inline; margin-right: 1rem; }
.columns { column-count: 2; column-gap: 2rem; }
article { break-inside: avoid; margin-bottom: 1.5rem; }
article h4 { font-style: italic; font-weight: normal; margin-top: 0; }";

const THEME_SCRIPT: &str = "\
const prefersDark = window.matchMedia('(prefers-color-scheme: dark)').matches;
document.documentElement.className = prefersDark ? 'theme-dark' : 'theme-light';";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders `edition` as a self-contained HTML page.
pub fn render_html(edition: &Edition) -> String {
    Page(edition).to_string()
}

struct Page<'a>(&'a Edition);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edition = self.0;
        let season = escape_html(&edition.season);
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>The Diplomacy Gazette - {season}</title>")?;
        writeln!(f, "<script>\n{THEME_SCRIPT}\n</script>")?;
        writeln!(f, "<style>\n{STYLE}\n</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;

        writeln!(f, "<header>")?;
        writeln!(f, "<h1>The Diplomacy Gazette</h1>")?;
        writeln!(f, "<p class=\"season\">{season}</p>")?;
        writeln!(f, "</header>")?;

        writeln!(f, "<section class=\"breaking\">")?;
        writeln!(f, "<h2>{}</h2>", escape_html(&edition.headline.title))?;
        writeln!(f, "<p>{}</p>", escape_html(&edition.headline.sentence))?;
        writeln!(f, "</section>")?;

        if !edition.standing.is_empty() {
            writeln!(f, "<ul class=\"standing\">")?;
            for standing in &edition.standing {
                writeln!(f, "<li>{}</li>", escape_html(&standing.to_string()))?;
            }
            writeln!(f, "</ul>")?;
        }

        writeln!(f, "<main class=\"columns\">")?;
        for story in &edition.stories {
            writeln!(f, "<article class=\"{}\">", story_class(&story.kind))?;
            writeln!(f, "<h3>{}</h3>", escape_html(&story.article.title))?;
            writeln!(f, "<h4>{}</h4>", escape_html(&story.article.subtitle))?;
            writeln!(f, "<p>{}</p>", escape_html(&story.article.paragraph))?;
            writeln!(f, "</article>")?;
        }
        if let Some(other) = &edition.other_news {
            writeln!(f, "<article class=\"other-news\">")?;
            writeln!(f, "<h3>In Other News</h3>")?;
            writeln!(f, "<p>{}</p>", escape_html(other))?;
            writeln!(f, "</article>")?;
        }
        writeln!(f, "</main>")?;

        writeln!(f, "</body>")?;
        writeln!(f, "</html>")?;
        Ok(())
    }
}

fn story_class(kind: &StoryKind) -> &'static str {
    match kind {
        StoryKind::Battle { .. } => "battle",
        StoryKind::Announcement { .. } => "announcement",
        StoryKind::OnThisDay => "on-this-day",
    }
}

/// Renders `edition` and writes it to `path`.
pub fn write_html(edition: &Edition, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_html(edition))
        .map_err(|source| Error::Output { path: path.to_path_buf(), source })
}
