//! Prompt builders for every piece of the edition.
//!
//! Article prompts all end with the same output template so that
//! [`parse_article`](super::article::parse_article) can split the reply.

use crate::announcements::Announcement;
use crate::battle::BattleSummary;
use crate::source::TerritoryCatalog;

use super::client::Prompt;

/// Articles are written with full creative freedom.
pub const ARTICLE_TEMPERATURE: f32 = 1.0;

/// The front page is picked deterministically.
pub const HEADLINE_TEMPERATURE: f32 = 0.0;

const ARTICLE_TEMPLATE: &str = "\
Output example:
---
Title: title goes here
Subtitle: subtitle goes here
Paragraph: paragraph goes here
---

Output:";

const SETTING: &str = "\
The newspaper covers European geopolitics in an alternate version of the \
First World War. Some territories may be held by different countries than \
they were in history; treat those as occupied. Do not mention diplomatic \
tensions under any circumstances: the countries are already engulfed in \
open conflict.";

/// Prompt for an article about one battle.
pub fn battle_report(summary: &BattleSummary, catalog: &TerritoryCatalog) -> Prompt {
    let text = format!(
        "I will share with you the adjudication of orders from a Diplomacy game. \
         You will invent an article for a newspaper about it.\n\
         {SETTING}\n\
         Invent extra drama and fictional people involved, and quote them on the \
         situation. Add comments from locals in the territories involved. Provide a \
         title, a subtitle and a paragraph, following the template below exactly.\n\
         \n\
         Report:\n\
         ---\n\
         Countries involved:\n\
         {countries}\
         Territories before the battle:\n\
         {possessions}\
         Orders:\n\
         {orders}\
         ---\n\
         {ARTICLE_TEMPLATE}",
        countries = summary.countries_text(),
        possessions = summary.possessions_text(catalog),
        orders = summary.orders_text(catalog),
    );
    Prompt::new(text, ARTICLE_TEMPERATURE)
}

/// Prompt for an article about a country's official announcement.
pub fn announcement(announcement: &Announcement) -> Prompt {
    let text = format!(
        "You are a newspaper publishing in the middle of the war. I will share with \
         you an official announcement by one of the imperial powers fighting for \
         control of the continent. Write a short article about it with a title, a \
         subtitle and a paragraph.\n\
         {SETTING}\n\
         Add reactions from other fictional or historical leaders to make the article \
         dramatic. Follow the template below exactly.\n\
         \n\
         Report:\n\
         ---\n\
         Country:\n\
         {user}\n\
         Message:\n\
         {message}\n\
         ---\n\
         {ARTICLE_TEMPLATE}",
        user = announcement.user,
        message = announcement.message,
    );
    Prompt::new(text, ARTICLE_TEMPERATURE)
}

/// Prompt for a historical piece dated to the game season.
pub fn on_this_day(season: &str) -> Prompt {
    let text = format!(
        "Write a short news piece about a major historical event that occurred in \
         {season}, written as if immediately after the event. Make it dramatic and \
         quote the people involved or affected. Provide a title, a subtitle and a \
         paragraph.\n\
         \n\
         {ARTICLE_TEMPLATE}"
    );
    Prompt::new(text, ARTICLE_TEMPERATURE)
}

/// Prompt for the "in other news" column covering uncontested moves.
pub fn other_news<'a>(
    summaries: impl IntoIterator<Item = &'a BattleSummary>,
    catalog: &TerritoryCatalog,
) -> Prompt {
    let orders: String = summaries.into_iter().map(|s| s.orders_text(catalog)).collect();
    let text = format!(
        "I will share with you the adjudication of orders from a Diplomacy game. \
         These are only the moves that involved no conflict between countries, though \
         the countries may be fighting elsewhere. Write one paragraph for the \"In other \
         news\" section of a newspaper: briefly describe what happened and make a \
         controversial comment on it as a whole.\n\
         \n\
         Report:\n\
         ---\n\
         {orders}\
         ---\n\
         \n\
         Output:"
    );
    Prompt::new(text, ARTICLE_TEMPERATURE)
}

/// Prompt for the front-page headline, given the titles of the articles.
pub fn front_page<'a>(titles: impl IntoIterator<Item = &'a str>) -> Prompt {
    let news: String = titles.into_iter().map(|title| format!("- {title}\n")).collect();
    let text = format!(
        "I will share with you the headlines of a newspaper covering the major events \
         of this season. The countries holding each territory may differ from history. \
         Pick one of the stories below and write a short, dramatic and sensational main \
         headline for it, plus a one-sentence summary to print beneath it.\n\
         \n\
         News:\n\
         ---\n\
         {news}\
         ---\n\
         Output example:\n\
         ---\n\
         Headline: title goes here\n\
         Sentence: sentence goes here\n\
         ---\n\
         \n\
         Output:"
    );
    Prompt::new(text, HEADLINE_TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{group_battles, summarize_battles};
    use crate::board::{Order, Ownership, Power, TerritoryId, TurnOrders};

    fn t(id: &str) -> TerritoryId {
        TerritoryId::new(id).unwrap()
    }

    fn summaries() -> Vec<BattleSummary> {
        let orders: TurnOrders = [
            (Power::England, t("Nth"), Order::move_to(t("Hol"))),
            (Power::Germany, t("Hol"), Order::hold()),
            (Power::Italy, t("Rom"), Order::move_to(t("Apu"))),
        ]
        .into_iter()
        .collect();
        let ownership: Ownership = [(t("Hol"), Power::Germany)].into_iter().collect();
        summarize_battles(&group_battles(&orders), &orders, &ownership)
    }

    #[test]
    fn battle_report_embeds_summary_blocks() {
        let summaries = summaries();
        let contested = summaries.iter().find(|s| s.is_contested()).unwrap();
        let prompt = battle_report(contested, &TerritoryCatalog::standard());
        assert_eq!(prompt.temperature, ARTICLE_TEMPERATURE);
        assert!(prompt.text.contains("Countries involved:\n- England\n- Germany\n"));
        assert!(prompt.text.contains("Territories before the battle:\nGermany:\n- Holland\n"));
        assert!(prompt.text.contains("origin: North Sea"));
        assert!(prompt.text.ends_with("Output:"));
    }

    #[test]
    fn announcement_names_country_and_message() {
        let prompt = announcement(&Announcement {
            user: "France".into(),
            message: "Paris will never fall.".into(),
        });
        assert!(prompt.text.contains("Country:\nFrance\nMessage:\nParis will never fall.\n"));
        assert!(prompt.text.contains("Title: title goes here"));
    }

    #[test]
    fn on_this_day_mentions_season() {
        assert!(on_this_day("Spring 1901").text.contains("occurred in Spring 1901"));
    }

    #[test]
    fn other_news_lists_uncontested_orders() {
        let summaries = summaries();
        let quiet = summaries.iter().filter(|s| !s.is_contested());
        let prompt = other_news(quiet, &TerritoryCatalog::standard());
        assert!(prompt.text.contains("origin: Rome"));
        assert!(!prompt.text.contains("origin: North Sea"));
    }

    #[test]
    fn front_page_is_deterministic_and_lists_titles() {
        let prompt = front_page(["Holland Besieged", "Rome Marches"]);
        assert_eq!(prompt.temperature, HEADLINE_TEMPERATURE);
        assert!(prompt.text.contains("- Holland Besieged\n- Rome Marches\n"));
        assert!(prompt.text.contains("Sentence: sentence goes here"));
    }
}
