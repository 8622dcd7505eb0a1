use lazy_regex::regex;
use scraper::ElementRef;

/// Visible text of `el`: text nodes concatenated as they appear, trimmed, with
/// inner whitespace runs collapsed to one space.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    let text = el.text().collect::<String>();
    regex!(r"\s+").replace_all(text.trim(), " ").into_owned()
}
