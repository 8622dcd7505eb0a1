use crate::{
    cnbc::{MarketRecord, NewsRecord},
    layout::{MarketSpec, NewsSpec},
    locate,
    selector::Read,
    Extractor, Layout, Located,
};
use scraper::{ElementRef, Html};

#[derive(Debug)]
pub struct MarketExtractor {
    spec: MarketSpec,
}

impl MarketExtractor {
    pub fn new(spec: MarketSpec) -> MarketExtractor {
        MarketExtractor { spec }
    }
}

impl Default for MarketExtractor {
    fn default() -> Self {
        MarketExtractor::new(Layout::cnbc().market)
    }
}

impl Extractor for MarketExtractor {
    type Record = MarketRecord;

    fn locate<'a>(&self, doc: &'a Html) -> Located<'a> {
        locate(doc, self.spec.container.as_ref(), &self.spec.card)
    }

    fn extract(&self, card: ElementRef<'_>) -> MarketRecord {
        let card = Some(card);
        MarketRecord {
            symbol: self.spec.symbol.value(card),
            position: self.spec.position.value(card),
            change_pct: self.spec.change_pct.value(card),
        }
    }
}

#[derive(Debug)]
pub struct NewsExtractor {
    spec: NewsSpec,
    link: Read,
}

impl NewsExtractor {
    pub fn new(spec: NewsSpec) -> NewsExtractor {
        let link = Read::Attr(spec.link_attr.clone());
        NewsExtractor { spec, link }
    }
}

impl Default for NewsExtractor {
    fn default() -> Self {
        NewsExtractor::new(Layout::cnbc().news)
    }
}

impl Extractor for NewsExtractor {
    type Record = NewsRecord;

    fn locate<'a>(&self, doc: &'a Html) -> Located<'a> {
        locate(doc, self.spec.container.as_ref(), &self.spec.item)
    }

    fn extract(&self, item: ElementRef<'_>) -> NewsRecord {
        let item = Some(item);
        let headline = self.spec.headline.resolve(item);
        NewsRecord {
            timestamp: self.spec.timestamp.value(item),
            title: self.spec.headline.read.apply(headline),
            link: self.link.apply(headline),
        }
    }
}
