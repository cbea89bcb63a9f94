//! The publishing pipeline for one turn.
//!
//! Battles are grouped and summarised, every contested battle and every
//! announcement becomes an article, uncontested moves are folded into an
//! "in other news" column, and a historical piece for the season closes the
//! paper. The headline is chosen last, from the titles that made it in.

use std::fmt;

use tracing::{info, warn};

use crate::announcements::Announcement;
use crate::battle::{group_battles, summarize_battles, BattleSummary};
use crate::board::province::Power;
use crate::board::state::Ownership;
use crate::error::{Error, Result};
use crate::press::article::{parse_article, parse_headline, Article, Headline};
use crate::press::cache::PromptCache;
use crate::press::client::{Generator, Prompt};
use crate::press::prompts;
use crate::source::{TerritoryCatalog, TurnSnapshot};

/// What an article was written about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryKind {
    /// A contested battle between these countries.
    Battle { countries: Vec<Power> },
    /// A country's official announcement.
    Announcement { user: String },
    /// The historical piece for the season.
    OnThisDay,
}

/// One published article and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub article: Article,
    pub kind: StoryKind,
}

/// A power's territory count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub power: Power,
    pub territories: usize,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.power, self.territories)
    }
}

/// Territory counts per power, most first, ties in standard power order.
pub fn standing(ownership: &Ownership) -> Vec<Standing> {
    ownership
        .counts()
        .into_iter()
        .map(|(power, territories)| Standing { power, territories })
        .collect()
}

/// Everything printed for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    pub season: String,
    pub headline: Headline,
    pub stories: Vec<Story>,
    pub other_news: Option<String>,
    pub standing: Vec<Standing>,
}

impl Edition {
    /// Writes the edition for `snapshot`, asking `generator` for every piece
    /// of text that `cache` does not already hold.
    ///
    /// Replies that do not follow the article template are skipped. Failing
    /// to get any article at all is an error, as is any generation failure.
    pub fn assemble<G: Generator + ?Sized>(
        snapshot: &TurnSnapshot,
        catalog: &TerritoryCatalog,
        announcements: &[Announcement],
        generator: &mut G,
        cache: &mut PromptCache,
    ) -> Result<Edition> {
        let battles = group_battles(&snapshot.orders);
        let summaries = summarize_battles(&battles, &snapshot.orders, &snapshot.territories);
        let contested = summaries.iter().filter(|s| s.is_contested()).count();
        info!(
            season = %snapshot.season,
            orders = snapshot.orders.len(),
            battles = battles.len(),
            contested,
            announcements = announcements.len(),
            "assembling edition"
        );

        let mut newsroom = Newsroom { generator, cache };
        let mut stories = Vec::new();

        for summary in summaries.iter().filter(|s| s.is_contested()) {
            let prompt = prompts::battle_report(summary, catalog);
            let kind = StoryKind::Battle { countries: summary.countries.clone() };
            stories.extend(newsroom.article(&prompt, kind)?);
        }

        for announcement in announcements {
            let prompt = prompts::announcement(announcement);
            let kind = StoryKind::Announcement { user: announcement.user.clone() };
            stories.extend(newsroom.article(&prompt, kind)?);
        }

        let other_news = newsroom.other_news(&summaries, catalog)?;

        let prompt = prompts::on_this_day(&snapshot.season);
        stories.extend(newsroom.article(&prompt, StoryKind::OnThisDay)?);

        if stories.is_empty() {
            return Err(Error::EmptyEdition);
        }

        let titles = stories.iter().map(|s| s.article.title.as_str());
        let reply = newsroom.generate(&prompts::front_page(titles))?;
        let headline = parse_headline(&reply)?;
        info!(stories = stories.len(), headline = %headline.title, "edition ready");

        Ok(Edition {
            season: snapshot.season.clone(),
            headline,
            stories,
            other_news,
            standing: standing(&snapshot.territories),
        })
    }
}

/// A generator paired with the cache that fronts it.
struct Newsroom<'a, G: Generator + ?Sized> {
    generator: &'a mut G,
    cache: &'a mut PromptCache,
}

impl<G: Generator + ?Sized> Newsroom<'_, G> {
    fn generate(&mut self, prompt: &Prompt) -> Result<String> {
        Ok(self.cache.get_or_generate(self.generator, prompt)?)
    }

    fn article(&mut self, prompt: &Prompt, kind: StoryKind) -> Result<Option<Story>> {
        let reply = self.generate(prompt)?;
        match parse_article(&reply) {
            Ok(article) => Ok(Some(Story { article, kind })),
            Err(e) => {
                warn!(error = %e, ?kind, "skipping article");
                Ok(None)
            }
        }
    }

    fn other_news(
        &mut self,
        summaries: &[BattleSummary],
        catalog: &TerritoryCatalog,
    ) -> Result<Option<String>> {
        let quiet: Vec<&BattleSummary> = summaries.iter().filter(|s| !s.is_contested()).collect();
        if quiet.is_empty() {
            return Ok(None);
        }
        let reply = self.generate(&prompts::other_news(quiet, catalog))?;
        let reply = reply.trim();
        Ok((!reply.is_empty()).then(|| reply.to_string()))
    }
}
