//! Article body extraction.
//!
//! Publisher markup is heterogeneous, so the body container is located by an
//! ordered list of independent [`ContainerStrategy`] values; the first one
//! that finds an element wins. When none does, every paragraph on the page is
//! used instead, trading some precision (sidebars, footers) for recall.
//!
//! # Default cascade
//!
//! | Order | Strategy | Selector |
//! |-------|----------|----------|
//! | 1 | `article` | `article` |
//! | 2 | `content-class` | `div.article-content, div.article-body, div.content-body` |
//! | 3 | `main-content-section` | `section.main-content` |
//! | 4 | `main` | `main` |
//! | - | fallback | every `p` on the page |
//!
//! Whatever the source, the paragraph text is joined with single spaces,
//! whitespace-collapsed, stripped of boilerplate and hard-truncated.

use crate::models::ArticleContent;
use crate::text::{collapse_whitespace, strip_boilerplate, truncate_chars};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, instrument};

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static CONTENT_CLASS: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.article-content, div.article-body, div.content-body").unwrap()
});
static MAIN_CONTENT_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.main-content").unwrap());
static MAIN: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());

/// Default character budget for single-article extraction.
pub const DEFAULT_MAX_CHARS: usize = 1500;

/// Paragraphs used per linked page in batch mode.
pub const LEAD_PARAGRAPHS: usize = 5;

/// One way of locating the element that holds an article's body.
pub trait ContainerStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// The container element, if this strategy recognizes the page.
    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

/// Picks the first element in document order matching a CSS selector.
pub struct SelectorStrategy {
    name: &'static str,
    selector: Selector,
}

/// A strategy was given CSS that does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSelector {
    pub strategy: &'static str,
    pub message: String,
}

impl fmt::Display for InvalidSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector for strategy {}: {}", self.strategy, self.message)
    }
}

impl std::error::Error for InvalidSelector {}

impl SelectorStrategy {
    pub fn new(name: &'static str, css: &str) -> Result<Self, InvalidSelector> {
        let selector = Selector::parse(css).map_err(|e| InvalidSelector {
            strategy: name,
            message: e.to_string(),
        })?;
        Ok(Self { name, selector })
    }

    fn from_static(name: &'static str, selector: &Lazy<Selector>) -> Self {
        Self {
            name,
            selector: Selector::clone(selector),
        }
    }
}

impl ContainerStrategy for SelectorStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.selector).next()
    }
}

/// Runs the container cascade and normalizes the result.
pub struct ContentExtractor {
    strategies: Vec<Box<dyn ContainerStrategy>>,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(Vec::new())
            .with_strategy(Box::new(SelectorStrategy::from_static("article", &ARTICLE)))
            .with_strategy(Box::new(SelectorStrategy::from_static("content-class", &CONTENT_CLASS)))
            .with_strategy(Box::new(SelectorStrategy::from_static(
                "main-content-section",
                &MAIN_CONTENT_SECTION,
            )))
            .with_strategy(Box::new(SelectorStrategy::from_static("main", &MAIN)))
    }
}

impl fmt::Debug for ContentExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentExtractor")
            .field("strategies", &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl ContentExtractor {
    pub fn new(strategies: Vec<Box<dyn ContainerStrategy>>) -> Self {
        Self { strategies }
    }

    /// Append a strategy after the existing ones.
    pub fn with_strategy(mut self, strategy: Box<dyn ContainerStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Extract the article body from `markup`.
    ///
    /// # Returns
    ///
    /// At most `max_chars` characters of cleaned body text, or an empty string
    /// when no paragraph text was found. A container that matches but holds no
    /// paragraphs also yields an empty string; the cascade does not continue
    /// past it.
    #[instrument(level = "debug", skip_all, fields(markup_bytes = markup.len(), max_chars = max_chars))]
    pub fn extract(&self, markup: &str, max_chars: usize) -> String {
        let document = Html::parse_document(markup);

        let container = self
            .strategies
            .iter()
            .find_map(|s| s.locate(&document).map(|el| (s.name(), el)));

        let joined = match container {
            Some((name, element)) => {
                debug!(strategy = name, "Located article container");
                element.select(&PARAGRAPH).map(paragraph_text).join(" ")
            }
            None => {
                debug!("No container matched; using every paragraph");
                document.select(&PARAGRAPH).map(paragraph_text).join(" ")
            }
        };

        let cleaned = strip_boilerplate(&collapse_whitespace(joined.trim()));
        truncate_chars(&cleaned, max_chars)
    }

    /// [`extract`](Self::extract) wrapped with its source URL.
    pub fn extract_article(&self, source_url: &str, markup: &str, max_chars: usize) -> ArticleContent {
        ArticleContent::new(source_url, self.extract(markup, max_chars))
    }
}

/// Text of the first `count` paragraphs on the page, joined with a space.
///
/// This is the cheaper heuristic the batch path uses for linked pages: no
/// container cascade and no cleanup. Empty when the page has no paragraphs.
pub fn lead_paragraphs(markup: &str, count: usize) -> String {
    let document = Html::parse_document(markup);
    document
        .select(&PARAGRAPH)
        .take(count)
        .map(paragraph_text)
        .join(" ")
}

fn paragraph_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_PAGE: &str = r#"
        <html><body>
            <nav><p>Home</p><p>World</p></nav>
            <article>
                <h1>Ignored heading</h1>
                <p>First   paragraph
                   of the story.</p>
                <p>Second <b>bold</b> paragraph.</p>
            </article>
            <footer><p>Copyright</p></footer>
        </body></html>
    "#;

    const CLASS_PAGE: &str = r#"
        <html><body>
            <div class="sidebar"><p>Sidebar</p></div>
            <div class="wrapper article-body"><p>Body one.</p><p>Body two.</p></div>
            <main><p>Main region</p></main>
        </body></html>
    "#;

    const SECTION_PAGE: &str = r#"
        <html><body>
            <p>Header blurb</p>
            <section class="main-content"><p>Section body.</p></section>
            <main><p>Main region</p></main>
        </body></html>
    "#;

    const MAIN_PAGE: &str = r#"
        <html><body>
            <header><p>Site header</p></header>
            <main><p>Main text.</p></main>
        </body></html>
    "#;

    const LOOSE_PAGE: &str = r#"
        <html><body>
            <div><p>Loose one.</p></div>
            <span>Not a paragraph</span>
            <p>Loose two.</p>
        </body></html>
    "#;

    fn extractor() -> ContentExtractor {
        ContentExtractor::default()
    }

    #[test]
    fn test_article_container_wins() {
        let text = extractor().extract(ARTICLE_PAGE, DEFAULT_MAX_CHARS);
        assert_eq!(text, "First paragraph of the story. Second bold paragraph.");
    }

    #[test]
    fn test_class_hinted_container() {
        let text = extractor().extract(CLASS_PAGE, DEFAULT_MAX_CHARS);
        assert_eq!(text, "Body one. Body two.");
    }

    #[test]
    fn test_main_content_section_before_main() {
        let text = extractor().extract(SECTION_PAGE, DEFAULT_MAX_CHARS);
        assert_eq!(text, "Section body.");
    }

    #[test]
    fn test_main_region() {
        let text = extractor().extract(MAIN_PAGE, DEFAULT_MAX_CHARS);
        assert_eq!(text, "Main text.");
    }

    #[test]
    fn test_falls_back_to_all_paragraphs() {
        let text = extractor().extract(LOOSE_PAGE, DEFAULT_MAX_CHARS);
        assert_eq!(text, "Loose one. Loose two.");
    }

    #[test]
    fn test_no_paragraphs_is_empty() {
        let text = extractor().extract("<html><body><div>Only divs</div></body></html>", 100);
        assert_eq!(text, "");
        assert_eq!(extractor().extract("", 100), "");
    }

    #[test]
    fn test_container_without_paragraphs_does_not_fall_back() {
        let page = "<article><div>No paragraphs</div></article><p>Outside</p>";
        assert_eq!(extractor().extract(page, 100), "");
    }

    #[test]
    fn test_boilerplate_removed() {
        let page = "<article><p>Story text.</p><p>Listen to the latest songs, only on JioSaavn.com</p></article>";
        assert_eq!(extractor().extract(page, 100), "Story text. ");
    }

    #[test]
    fn test_truncation_bound_holds() {
        let long = format!("<article><p>{}</p></article>", "héllo wörld ".repeat(400));
        for max in [0usize, 1, 7, 100, 1500, 10_000] {
            let text = extractor().extract(&long, max);
            assert!(text.chars().count() <= max, "max {} produced {}", max, text.chars().count());
        }
        assert_eq!(extractor().extract(&long, 7), "héllo w");
    }

    #[test]
    fn test_extract_article_reports_char_length() {
        let article = extractor().extract_article("https://example.com/a", ARTICLE_PAGE, 10);
        assert_eq!(article.extracted_text, "First para");
        assert_eq!(article.length, 10);
        assert_eq!(article.source_url, "https://example.com/a");
    }

    struct ById;

    impl ContainerStrategy for ById {
        fn name(&self) -> &'static str {
            "story-id"
        }

        fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
            static STORY: Lazy<Selector> = Lazy::new(|| Selector::parse("#story").unwrap());
            document.select(&STORY).next()
        }
    }

    #[test]
    fn test_custom_strategy_is_pure_addition() {
        let page = r#"<div id="story"><p>Publisher body.</p></div><p>Other.</p>"#;
        assert_eq!(extractor().extract(page, 100), "Publisher body. Other.");

        let custom = extractor().with_strategy(Box::new(ById));
        assert_eq!(custom.extract(page, 100), "Publisher body.");
    }

    #[test]
    fn test_default_cascade_order() {
        assert_eq!(
            format!("{:?}", extractor()),
            r#"ContentExtractor { strategies: ["article", "content-class", "main-content-section", "main"] }"#
        );
    }

    #[test]
    fn test_selector_strategy_rejects_bad_css() {
        let err = SelectorStrategy::new("broken", "div[").err().unwrap();
        assert_eq!(err.strategy, "broken");
        assert!(err.to_string().starts_with("invalid selector for strategy broken"));
    }

    #[test]
    fn test_selector_strategy_appended_to_cascade() {
        let page = r#"<div class="story-text"><p>Publisher body.</p></div><p>Other.</p>"#;
        let custom = extractor().with_strategy(Box::new(SelectorStrategy::new("story-text", "div.story-text").unwrap()));
        assert_eq!(custom.extract(page, 100), "Publisher body.");
    }

    #[test]
    fn test_lead_paragraphs_takes_first_n_raw() {
        let page = (1..=8).map(|i| format!("<p>P{}</p>", i)).collect::<String>();
        assert_eq!(lead_paragraphs(&page, LEAD_PARAGRAPHS), "P1 P2 P3 P4 P5");
        assert_eq!(lead_paragraphs("<div>none</div>", LEAD_PARAGRAPHS), "");
    }
}
