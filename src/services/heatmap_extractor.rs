//! Pulls (ticker, percent-change) tiles out of a sector page's heatmap.
//!
//! The site's generated class tokens change between builds, so elements are
//! matched on a set of required class tokens rather than the exact `class`
//! attribute. Irregular markup only degrades the sector's result; it never
//! fails the run.

use scraper::node::Element;
use scraper::{ElementRef, Html};

use crate::models::sector::{Entry, SectorKey, SectorResult, SectorStatus};
use crate::models::settings::HeatmapSelectors;

/// Decides whether an element is the one a lookup is after.
pub trait ClassMatcher {
    fn matches(&self, element: &Element) -> bool;
}

/// Matches a tag whose class list contains every required token,
/// in any order, ignoring extra tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTokens {
    tag: String,
    tokens: Vec<String>,
}

impl ClassTokens {
    /// `classes` is a whitespace separated token list, e.g. "none-link fin-size-medium".
    pub fn new(tag: &str, classes: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            tokens: classes.split_whitespace().map(str::to_string).collect(),
        }
    }
}

impl ClassMatcher for ClassTokens {
    fn matches(&self, element: &Element) -> bool {
        if !element.name().eq_ignore_ascii_case(&self.tag) {
            return false;
        }
        self.tokens
            .iter()
            .all(|token| element.classes().any(|c| c == token))
    }
}

/// The four lookups of one heatmap layout.
pub struct HeatmapLayout<M: ClassMatcher = ClassTokens> {
    pub container: M,
    pub item: M,
    pub ticker: M,
    pub percent: M,
}

impl HeatmapLayout<ClassTokens> {
    pub fn from_selectors(selectors: &HeatmapSelectors) -> Self {
        Self {
            container: ClassTokens::new(&selectors.container_tag, &selectors.container_class),
            item: ClassTokens::new(&selectors.item_tag, &selectors.item_class),
            ticker: ClassTokens::new(&selectors.ticker_tag, &selectors.ticker_class),
            percent: ClassTokens::new(&selectors.percent_tag, &selectors.percent_class),
        }
    }
}

impl Default for HeatmapLayout<ClassTokens> {
    fn default() -> Self {
        Self::from_selectors(&HeatmapSelectors::default())
    }
}

/// Extracts one sector's entries, sorted by ticker.
pub fn extract_sector<M: ClassMatcher>(
    html: &str,
    sector: &SectorKey,
    layout: &HeatmapLayout<M>,
) -> SectorResult {
    let document = Html::parse_document(html);

    let Some(container) = find_first(document.root_element(), &layout.container) else {
        log::warn!("{}: heatmap container not found", sector);
        return SectorResult::empty(sector.clone(), SectorStatus::ContainerNotFound);
    };

    let items: Vec<ElementRef> = find_all(container, &layout.item).collect();
    if items.is_empty() {
        log::warn!("{}: no heatmap items found", sector);
        return SectorResult::empty(sector.clone(), SectorStatus::NoItemsFound);
    }

    let mut entries = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match extract_entry(item, layout) {
            Some(entry) => entries.push(entry),
            None => log::debug!("{}: item #{} lacks ticker or percent child, skipped", sector, idx),
        }
    }
    if entries.is_empty() {
        log::warn!("{}: every heatmap item was incomplete", sector);
    }

    SectorResult::collected(sector.clone(), entries)
}

fn extract_entry<M: ClassMatcher>(item: ElementRef, layout: &HeatmapLayout<M>) -> Option<Entry> {
    let ticker = find_first(item, &layout.ticker)?;
    let percent = find_first(item, &layout.percent)?;
    Some(Entry::new(text_of(ticker), text_of(percent)))
}

fn find_all<'a, 'm, M: ClassMatcher>(
    scope: ElementRef<'a>,
    matcher: &'m M,
) -> impl Iterator<Item = ElementRef<'a>> + 'm
where
    'a: 'm,
{
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| matcher.matches(el.value()))
}

fn find_first<'a, M: ClassMatcher>(scope: ElementRef<'a>, matcher: &M) -> Option<ElementRef<'a>> {
    find_all(scope, matcher).next()
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
