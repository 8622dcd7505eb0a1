//! Declarative building blocks of a layout: CSS selectors that remember their
//! source text, markers for containers and items, and field specs with an
//! ordered fallback chain.

use crate::{utils, ExtractorError};
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed CSS selector together with the text it was parsed from, so layouts
/// can be written back out as JSON.
#[derive(Clone)]
pub struct Css {
    raw: String,
    selector: Selector,
}

impl Css {
    pub fn parse(raw: &str) -> Result<Css, ExtractorError> {
        let selector = Selector::parse(raw)
            .map_err(|e| ExtractorError::InvalidSelector(format!("{}: {:?}", raw, e)))?;
        Ok(Css {
            raw: raw.to_string(),
            selector,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Debug for Css {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Css({:?})", self.raw)
    }
}

impl PartialEq for Css {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl TryFrom<String> for Css {
    type Error = ExtractorError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Css::parse(&raw)
    }
}

impl Serialize for Css {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Css {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Css::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// How a container or an item node is recognised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Css(Css),
    /// Element whose tag is one of `tags` (any tag when empty) and whose
    /// `class` attribute contains one of `needles`, compared case-insensitively.
    ClassContains {
        #[serde(default)]
        tags: Vec<String>,
        needles: Vec<String>,
    },
}

impl Marker {
    pub fn css(raw: &str) -> Result<Marker, ExtractorError> {
        Ok(Marker::Css(Css::parse(raw)?))
    }

    pub fn class_contains(tags: &[&str], needles: &[&str]) -> Marker {
        Marker::ClassContains {
            tags: tags.iter().map(ToString::to_string).collect(),
            needles: needles.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// All elements inside `scope` carrying this marker, in document order.
    pub fn find_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match self {
            Marker::Css(css) => scope.select(css.selector()).collect(),
            Marker::ClassContains { tags, needles } => scope
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|el| {
                    let element = el.value();
                    let tag_ok =
                        tags.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(element.name()));
                    tag_ok
                        && element.attr("class").map_or(false, |class| {
                            let class = class.to_lowercase();
                            needles.iter().any(|n| class.contains(&n.to_lowercase()))
                        })
                })
                .collect(),
        }
    }

    pub fn find_first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            Marker::Css(css) => scope.select(css.selector()).next(),
            Marker::ClassContains { .. } => self.find_all(scope).into_iter().next(),
        }
    }
}

/// What to read from the node a field spec resolves to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Read {
    #[default]
    Text,
    Attr(String),
}

impl Read {
    /// Missing node or missing attribute both read as the empty string.
    pub fn apply(&self, node: Option<ElementRef<'_>>) -> String {
        match (self, node) {
            (_, None) => String::new(),
            (Read::Text, Some(el)) => utils::element_text(el),
            (Read::Attr(name), Some(el)) => el
                .value()
                .attr(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        }
    }
}

/// One output column: candidates are tried in order and the first selector
/// matching inside the item wins. With no candidates the item itself is read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub candidates: Vec<Css>,
    #[serde(default)]
    pub read: Read,
}

impl FieldSpec {
    pub fn text(candidates: &[&str]) -> Result<FieldSpec, ExtractorError> {
        Ok(FieldSpec {
            candidates: candidates
                .iter()
                .map(|c| Css::parse(c))
                .collect::<Result<_, _>>()?,
            read: Read::Text,
        })
    }

    pub fn attr(candidates: &[&str], name: &str) -> Result<FieldSpec, ExtractorError> {
        Ok(FieldSpec {
            read: Read::Attr(name.to_string()),
            ..FieldSpec::text(candidates)?
        })
    }

    /// Node the field resolves to inside `item`, if any.
    pub fn resolve<'a>(&self, item: Option<ElementRef<'a>>) -> Option<ElementRef<'a>> {
        let item = item?;
        if self.candidates.is_empty() {
            return Some(item);
        }
        self.candidates
            .iter()
            .find_map(|css| item.select(css.selector()).next())
    }

    pub fn value(&self, item: Option<ElementRef<'_>>) -> String {
        self.read.apply(self.resolve(item))
    }
}
