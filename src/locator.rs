use crate::selector::Marker;
use scraper::{ElementRef, Html};

/// Outcome of looking for the item nodes of one record kind.
#[derive(Debug)]
pub enum Located<'a> {
    Items(Vec<ElementRef<'a>>),
    ContainerNotFound,
    NoItems,
}

impl<'a> Located<'a> {
    /// Item nodes, empty for either miss.
    pub fn into_items(self) -> Vec<ElementRef<'a>> {
        match self {
            Located::Items(items) => items,
            Located::ContainerNotFound | Located::NoItems => vec![],
        }
    }
}

/// Find the first node carrying `container` (the whole document when there is
/// no container marker) and collect the nodes inside it carrying `item`.
pub fn locate<'a>(doc: &'a Html, container: Option<&Marker>, item: &Marker) -> Located<'a> {
    let scope = match container {
        Some(marker) => match marker.find_first(doc.root_element()) {
            Some(el) => el,
            None => return Located::ContainerNotFound,
        },
        None => doc.root_element(),
    };

    let items = item.find_all(scope);
    if items.is_empty() {
        Located::NoItems
    } else {
        Located::Items(items)
    }
}
