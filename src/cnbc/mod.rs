mod extractor;

pub use extractor::{MarketExtractor, NewsExtractor};

use crate::{Record, RecordKind};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketRecord {
    pub symbol: String,
    pub position: String,
    pub change_pct: String,
}

impl Record for MarketRecord {
    const KIND: RecordKind = RecordKind::Market;
    const HEADERS: &'static [&'static str] = &["Symbol", "StockPosition", "ChangePct"];

    fn fields(&self) -> Vec<&str> {
        vec![
            self.symbol.as_str(),
            self.position.as_str(),
            self.change_pct.as_str(),
        ]
    }
}

impl fmt::Display for MarketRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {:>14} {:>10}", self.symbol, self.position, self.change_pct)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsRecord {
    pub timestamp: String,
    pub title: String,
    /// As found in the page, often relative.
    pub link: String,
}

impl Record for NewsRecord {
    const KIND: RecordKind = RecordKind::News;
    const HEADERS: &'static [&'static str] = &["Timestamp", "Title", "Link"];

    fn fields(&self) -> Vec<&str> {
        vec![
            self.timestamp.as_str(),
            self.title.as_str(),
            self.link.as_str(),
        ]
    }
}

impl fmt::Display for NewsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timestamp : {}", self.timestamp)?;
        writeln!(f, "Title     : {}", self.title)?;
        write!(f, "Link      : {}", self.link)
    }
}
