//! Article cards of a blog category page (title and link read off each card
//! anchor).

use crate::{layout::CardSpec, locate, Extractor, Located, Record, RecordKind};
use scraper::{ElementRef, Html};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardRecord {
    pub title: String,
    pub link: String,
}

impl Record for CardRecord {
    const KIND: RecordKind = RecordKind::Cards;
    const HEADERS: &'static [&'static str] = &["Title", "Link"];

    fn fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.link.as_str()]
    }
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title : {}", self.title)?;
        write!(f, "Link  : {}", self.link)
    }
}

#[derive(Debug)]
pub struct CardExtractor {
    spec: CardSpec,
}

impl CardExtractor {
    pub fn new(spec: CardSpec) -> CardExtractor {
        CardExtractor { spec }
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        CardExtractor::new(CardSpec::itineraries())
    }
}

impl Extractor for CardExtractor {
    type Record = CardRecord;

    fn locate<'a>(&self, doc: &'a Html) -> Located<'a> {
        locate(doc, self.spec.container.as_ref(), &self.spec.card)
    }

    fn extract(&self, card: ElementRef<'_>) -> CardRecord {
        let card = Some(card);
        CardRecord {
            title: self.spec.title.value(card),
            link: self.spec.link.value(card),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_parsing_itinerary_cards() {
        let html = fs::read_to_string("tests/htmls/itineraries.html").expect("Invalid file url");
        let doc = Html::parse_document(&html);

        let records = CardExtractor::default().extract_all(&doc);
        assert_eq!(
            records,
            vec![
                CardRecord {
                    title: "3 Days in Lisbon".to_string(),
                    link: "https://myperfectitinerary.com/lisbon-3-days/".to_string(),
                },
                CardRecord {
                    title: String::new(),
                    link: "https://myperfectitinerary.com/kyoto-itinerary/".to_string(),
                },
                CardRecord {
                    title: "Weekend in Porto".to_string(),
                    link: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_display() {
        let record = CardRecord {
            title: "3 Days in Lisbon".to_string(),
            link: String::new(),
        };
        assert_eq!(record.to_string(), "Title : 3 Days in Lisbon\nLink  : ");
    }

    #[test]
    fn test_missing_attributes_are_empty_not_sentinel() {
        let doc = Html::parse_document(r#"<a class="penci-image-holder penci-lazy"></a>"#);
        let records = CardExtractor::default().extract_all(&doc);
        assert_eq!(records, vec![CardRecord::default()]);
    }
}
