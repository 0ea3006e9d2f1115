// src/services/notifications.rs

//! Notification list extraction.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{NotificationEntry, NotificationFeed};
use crate::services::Unmatched;
use crate::utils::markup::{capture, compile_regex, parse_selector};

/// List items carry alternating `odd`/`eve` classes. Only the `odd` rows are
/// scoped to the info list; `eve` rows are counted wherever they appear.
const ITEM_SELECTOR: &str = "ul.info-list li.odd, li.eve";

/// Maps notification-list markup into a [`NotificationFeed`].
#[derive(Debug, Clone)]
pub struct NotificationExtractor {
    item_sel: Selector,
    anchor_sel: Selector,
    id: Regex,
}

impl NotificationExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            item_sel: parse_selector(ITEM_SELECTOR)?,
            anchor_sel: parse_selector("a")?,
            id: compile_regex(r"id=(.*)")?,
        })
    }

    /// Extract one slot per list item, in document order.
    pub fn extract(&self, markup: &str) -> NotificationFeed {
        let document = Html::parse_document(markup);
        let items: Vec<ElementRef<'_>> = document.select(&self.item_sel).collect();
        let mut feed = NotificationFeed::with_len(items.len());

        for (i, item) in items.into_iter().enumerate() {
            match self.read_item(item) {
                Ok(entry) => {
                    feed.set(i, Some(entry));
                }
                Err(reason) => log::debug!("Notification {i} left empty: {reason}"),
            }
        }

        feed
    }

    fn read_item(&self, item: ElementRef<'_>) -> std::result::Result<NotificationEntry, Unmatched> {
        let anchor = item.select(&self.anchor_sel).next().ok_or(Unmatched::NoAnchor)?;
        let href = anchor.value().attr("href").ok_or(Unmatched::NoLink)?;
        let id = capture(&self.id, href).ok_or(Unmatched::Identifier)?;
        let display_name: String = anchor.text().collect();
        Ok(NotificationEntry::new(id, display_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> String {
        format!(
            r#"<html><body><ul class="info-list">{}</ul></body></html>"#,
            items.concat()
        )
    }

    #[test]
    fn test_missing_id_keeps_slot() {
        let markup = list(&[
            r#"<li class="odd"><a href="informations.php?id=101">Exam schedule</a></li>"#,
            r#"<li class="eve"><a href="informations.php?page=2">Broken</a></li>"#,
            r#"<li class="odd"><a href="informations.php?id=103">Library hours</a></li>"#,
        ]);

        let feed = NotificationExtractor::new().unwrap().extract(&markup);
        assert_eq!(feed.len(), 3);
        assert_eq!(
            feed.get(0),
            Some(&NotificationEntry::new("101", "Exam schedule"))
        );
        assert_eq!(feed.get(1), None);
        assert_eq!(
            feed.get(2),
            Some(&NotificationEntry::new("103", "Library hours"))
        );
    }

    #[test]
    fn test_item_without_anchor() {
        let markup = list(&[
            r#"<li class="odd">No notifications</li>"#,
            r#"<li class="eve"><a href="?id=7&amp;x=1">Seven</a></li>"#,
        ]);

        let feed = NotificationExtractor::new().unwrap().extract(&markup);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.get(0), None);
        // everything after `id=` is kept
        assert_eq!(feed.get(1).map(|n| n.id.as_str()), Some("7&x=1"));
    }

    #[test]
    fn test_document_order_and_unstyled_items() {
        let markup = list(&[
            r#"<li class="eve"><a href="?id=1">One</a></li>"#,
            r#"<li><a href="?id=skip">Unstyled</a></li>"#,
            r#"<li class="odd"><a href="?id=2">Two <b>bold</b></a></li>"#,
        ]);

        let feed = NotificationExtractor::new().unwrap().extract(&markup);
        let names: Vec<_> = feed.entries().map(|n| n.display_name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two bold"]);
    }

    #[test]
    fn test_eve_rows_outside_info_list_take_a_slot() {
        let markup = r#"<html><body>
            <ul class="info-list"><li class="odd"><a href="?id=1">One</a></li></ul>
            <ul class="side"><li class="eve"><a href="?id=2">Side</a></li></ul>
            <ul class="side"><li class="odd"><a href="?id=3">Ignored</a></li></ul>
        </body></html>"#;

        let feed = NotificationExtractor::new().unwrap().extract(markup);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.get(0), Some(&NotificationEntry::new("1", "One")));
        assert_eq!(feed.get(1), Some(&NotificationEntry::new("2", "Side")));
    }

    #[test]
    fn test_empty_page() {
        let feed = NotificationExtractor::new().unwrap().extract("<p>nothing</p>");
        assert!(feed.is_empty());
    }
}
