//! The newsroom: text generation, memoisation, prompts and article parsing.

pub mod article;
pub mod cache;
pub mod client;
pub mod prompts;

pub use article::{parse_article, parse_headline, Article, ArticleError, Headline};
pub use cache::PromptCache;
pub use client::{ApiFormat, Generator, OpenAiClient, Prompt, PressError};
