//! RSS 2.0 feed parsing.
//!
//! Feeds are parsed with a small `quick-xml` state machine over the
//! `<item>` elements, collecting `title`, `link`, `description`, and
//! `pubDate`. Channel-level elements with the same names are ignored.
//!
//! # Data quality
//!
//! - `pubDate` values are parsed as RFC 2822 with an RFC 3339 fallback;
//!   anything else leaves `published` unset, which keeps the article out of
//!   every digest window downstream.
//! - Descriptions frequently arrive as HTML fragments; they are reduced to
//!   whitespace-collapsed plain text.
//! - Relative `link` values are resolved against the feed URL. Items missing
//!   both title and link are dropped.

use crate::feeds::FeedSource;
use crate::models::Article;
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use scraper::Html;
use std::error::Error;
use tracing::{debug, warn};
use url::Url;

/// The item field currently being read.
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

#[derive(Default)]
struct RawItem {
    title: String,
    link: String,
    description: String,
    pub_date: String,
}

/// Parse one RSS document into articles attributed to `source`.
pub fn parse_feed(xml: &str, source: &FeedSource) -> Result<Vec<Article>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut in_item = false;
    let mut field: Option<Field> = None;
    let mut item = RawItem::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = true;
                    item = RawItem::default();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"link" if in_item => field = Some(Field::Link),
                b"description" if in_item => field = Some(Field::Description),
                b"pubDate" if in_item => field = Some(Field::PubDate),
                _ => field = None,
            },
            Event::Text(t) => {
                if let Some(f) = &field {
                    push_text(&mut item, f, &t.decode()?);
                }
            }
            Event::GeneralRef(r) => {
                if let Some(f) = &field {
                    let name = r.decode()?;
                    push_text(&mut item, f, &quick_xml::escape::unescape(&format!("&{name};"))?);
                }
            }
            Event::CData(t) => {
                if let Some(f) = &field {
                    push_text(&mut item, f, &String::from_utf8_lossy(t.as_ref()));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"item" => {
                    in_item = false;
                    field = None;
                    if let Some(article) = finish_item(std::mem::take(&mut item), source) {
                        articles.push(article);
                    }
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(articles)
}

fn push_text(item: &mut RawItem, field: &Field, text: &str) {
    let target = match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::Description => &mut item.description,
        Field::PubDate => &mut item.pub_date,
    };
    target.push_str(text);
}

fn finish_item(item: RawItem, source: &FeedSource) -> Option<Article> {
    let title = item.title.trim().to_string();
    let link = resolve_link(item.link.trim(), source.url);
    if title.is_empty() && link.is_empty() {
        debug!(source = source.name, "Dropping feed item with no title or link");
        return None;
    }

    let published = parse_published(item.pub_date.trim());
    if published.is_none() && !item.pub_date.trim().is_empty() {
        warn!(
            source = source.name,
            raw = %item.pub_date.trim(),
            "Unparseable pubDate; article will fall outside every window"
        );
    }

    Some(Article {
        title,
        link,
        description: strip_html(&item.description),
        published,
        source: source.name.to_string(),
        priority: source.priority,
    })
}

/// Parse a feed timestamp: RFC 2822 first (the RSS norm), RFC 3339 second.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Resolve a possibly-relative item link against the feed URL.
fn resolve_link(raw: &str, feed_url: &str) -> String {
    if raw.is_empty() || Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    match Url::parse(feed_url).and_then(|base| base.join(raw)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Reduce an HTML fragment to whitespace-collapsed plain text.
pub fn strip_html(input: &str) -> String {
    let text = if input.contains('<') {
        let fragment = Html::parse_fragment(input);
        fragment.root_element().text().collect::<Vec<_>>().join(" ")
    } else {
        input.to_string()
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
