//! Parsing of generated replies into articles and the front-page headline.

use serde::Serialize;
use thiserror::Error;

/// Errors raised when a reply does not follow the requested template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleError {
    #[error("reply has no '{0}' marker")]
    MissingMarker(&'static str),

    #[error("reply has an empty paragraph")]
    EmptyParagraph,
}

/// One newspaper article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub subtitle: String,
    pub paragraph: String,
}

/// The front-page banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub sentence: String,
}

/// Splits a `Title: / Subtitle: / Paragraph:` reply into an article.
///
/// Only the first article counts: anything before the first `Title: ` and
/// from the second `Title: ` on is ignored. Fields lose surrounding
/// whitespace and double quotes; the paragraph also loses a leading
/// "In a ..., " scene-setting clause and starts with a capital letter.
pub fn parse_article(reply: &str) -> Result<Article, ArticleError> {
    let (_, rest) = reply.split_once("Title: ").ok_or(ArticleError::MissingMarker("Title: "))?;
    let rest = rest.split("Title: ").next().unwrap_or(rest);
    let (title, rest) =
        rest.split_once("Subtitle: ").ok_or(ArticleError::MissingMarker("Subtitle: "))?;
    let (subtitle, paragraph) =
        rest.split_once("Paragraph: ").ok_or(ArticleError::MissingMarker("Paragraph: "))?;

    let paragraph = clean(paragraph.trim_end().trim_end_matches("---"));
    let paragraph = capitalize_first(strip_leading_clause(paragraph));
    if paragraph.is_empty() {
        return Err(ArticleError::EmptyParagraph);
    }

    Ok(Article {
        title: clean(title).to_string(),
        subtitle: clean(subtitle).to_string(),
        paragraph,
    })
}

/// Splits a `Headline: / Sentence:` reply into the front-page banner.
pub fn parse_headline(reply: &str) -> Result<Headline, ArticleError> {
    let reply = reply.replace('"', "").replace("---", "");
    let (title, sentence) =
        reply.split_once("Sentence: ").ok_or(ArticleError::MissingMarker("Sentence: "))?;
    Ok(Headline {
        title: title.replace("Headline: ", "").trim().to_string(),
        sentence: sentence.trim().to_string(),
    })
}

fn clean(field: &str) -> &str {
    field.trim().trim_matches('"')
}

/// Drops an opening "In a <scene>, " clause up to its first comma.
fn strip_leading_clause(paragraph: &str) -> &str {
    let first_line = paragraph.lines().next().unwrap_or("");
    if !paragraph.starts_with("In a") {
        return paragraph;
    }
    match first_line.find(", ") {
        Some(i) => &paragraph[i + 2..],
        None => paragraph,
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
