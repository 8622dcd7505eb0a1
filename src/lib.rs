use scraper::{ElementRef, Html};
use std::fmt;

pub mod cards;
pub mod cnbc;
pub mod fetch;
pub mod layout;
pub mod locator;
pub mod pipeline;
pub mod report;
pub mod selector;
pub mod sink;

mod error;
mod utils;

pub use error::ExtractorError;
pub use layout::Layout;
pub use locator::{locate, Located};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Market,
    News,
    Cards,
}

impl RecordKind {
    /// File name of the CSV written for this kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Market => "market_data.csv",
            RecordKind::News => "news_data.csv",
            RecordKind::Cards => "card_data.csv",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Market => "market",
            RecordKind::News => "news",
            RecordKind::Cards => "cards",
        };
        f.write_str(name)
    }
}

/// A fixed-width row. `fields` is always as wide as `HEADERS` and in the same
/// order.
pub trait Record {
    const KIND: RecordKind;
    const HEADERS: &'static [&'static str];

    fn fields(&self) -> Vec<&str>;
}

pub trait Extractor {
    type Record: Record;

    fn locate<'a>(&self, doc: &'a Html) -> Located<'a>;
    fn extract(&self, item: ElementRef<'_>) -> Self::Record;

    fn extract_all(&self, doc: &Html) -> Vec<Self::Record> {
        self.locate(doc)
            .into_items()
            .into_iter()
            .map(|item| self.extract(item))
            .collect()
    }
}
