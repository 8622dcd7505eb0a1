//! Selector tables, one spec per record kind.
//!
//! Everything that depends on the page markup lives here as data. Two presets
//! are built in: `cnbc` for the current CNBC world page and `loose` for the
//! older fuzzy heuristics. Any other table can be loaded from JSON, e.g.
//!
//! ```json
//! {
//!   "market": {
//!     "container": {"css": "div#market-data-scroll-container"},
//!     "card": {"css": ".MarketCard-container"},
//!     "symbol": {"candidates": ["span.MarketCard-symbol"]},
//!     "position": {"candidates": ["span.MarketCard-stockPosition"]},
//!     "change_pct": {"candidates": ["span.MarketCard-changesPct"]}
//!   },
//!   "news": {
//!     "container": {"css": "ul.LatestNews-list"},
//!     "item": {"css": "li.LatestNews-item"},
//!     "timestamp": {"candidates": [".LatestNews-timestamp", "time"]},
//!     "headline": {"candidates": ["a.LatestNews-headline", "a"]}
//!   }
//! }
//! ```

use crate::selector::{FieldSpec, Marker};
use crate::ExtractorError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSpec {
    #[serde(default)]
    pub container: Option<Marker>,
    pub card: Marker,
    pub symbol: FieldSpec,
    pub position: FieldSpec,
    pub change_pct: FieldSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsSpec {
    #[serde(default)]
    pub container: Option<Marker>,
    pub item: Marker,
    pub timestamp: FieldSpec,
    /// Title text comes from the matched headline node, the link from its
    /// `link_attr` attribute.
    pub headline: FieldSpec,
    #[serde(default = "default_link_attr")]
    pub link_attr: String,
}

fn default_link_attr() -> String {
    "href".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSpec {
    #[serde(default)]
    pub container: Option<Marker>,
    pub card: Marker,
    pub title: FieldSpec,
    pub link: FieldSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub market: MarketSpec,
    pub news: NewsSpec,
    #[serde(default)]
    pub cards: Option<CardSpec>,
}

const E: &str = "Invalid selector";
lazy_static! {
    static ref CNBC: Layout = Layout {
        market: MarketSpec {
            container: Some(Marker::css("div#market-data-scroll-container").expect(E)),
            card: Marker::css("a.MarketCard-container, div.MarketCard-container").expect(E),
            symbol: FieldSpec::text(&["span.MarketCard-symbol"]).expect(E),
            position: FieldSpec::text(&["span.MarketCard-stockPosition"]).expect(E),
            change_pct: FieldSpec::text(&["span.MarketCard-changesPct"]).expect(E),
        },
        news: NewsSpec {
            container: Some(Marker::css("ul.LatestNews-list").expect(E)),
            item: Marker::css("li.LatestNews-item").expect(E),
            timestamp: FieldSpec::text(&[".LatestNews-timestamp", "time", "span.timestamp"])
                .expect(E),
            headline: FieldSpec::text(&["a.LatestNews-headline", "a.headline", "a"]).expect(E),
            link_attr: default_link_attr(),
        },
        cards: Some(ITINERARY_CARDS.clone()),
    };
    static ref LOOSE: Layout = Layout {
        market: MarketSpec {
            container: None,
            card: Marker::css("div.marketCard").expect(E),
            symbol: FieldSpec::text(&["div.marketCard_symbol"]).expect(E),
            position: FieldSpec::text(&["div.marketCard_stockPosition"]).expect(E),
            change_pct: FieldSpec::text(&["div.marketCard-changePct"]).expect(E),
        },
        news: NewsSpec {
            container: None,
            item: Marker::class_contains(
                &["div", "article"],
                &["latestnews", "latest-news", "news-item", "latesnews-item"],
            ),
            timestamp: FieldSpec::text(&["span.LatestNews-timestamp", "time", "span.timestamp"])
                .expect(E),
            headline: FieldSpec::text(&["a.headline", "a", "h3 a"]).expect(E),
            link_attr: default_link_attr(),
        },
        cards: Some(ITINERARY_CARDS.clone()),
    };
    static ref ITINERARY_CARDS: CardSpec = CardSpec {
        container: None,
        card: Marker::css("a.penci-image-holder.penci-lazy").expect(E),
        title: FieldSpec::attr(&[], "title").expect(E),
        link: FieldSpec::attr(&[], "href").expect(E),
    };
}

impl Layout {
    pub fn cnbc() -> Layout {
        CNBC.clone()
    }

    pub fn loose() -> Layout {
        LOOSE.clone()
    }

    pub fn from_json(json: &str) -> Result<Layout, ExtractorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Layout, ExtractorError> {
        let json = std::fs::read_to_string(path)?;
        Layout::from_json(&json)
    }
}

impl CardSpec {
    /// Image-holder anchors of a WordPress (Penci theme) category page.
    pub fn itineraries() -> CardSpec {
        ITINERARY_CARDS.clone()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::cnbc()
    }
}
