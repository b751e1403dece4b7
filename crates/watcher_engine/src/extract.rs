use scraper::Html;
use watcher_core::ExtractionResult;

use crate::selector::{compile_selector, SelectorError};

pub trait Extractor: Send + Sync {
    fn extract(&self, document: &str, selector: &str) -> Result<ExtractionResult, SelectorError>;
}

/// Applies a selector with `scraper`. Each match contributes the
/// concatenated text of its descendant text nodes, in document order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperExtractor;

impl Extractor for ScraperExtractor {
    fn extract(&self, document: &str, selector: &str) -> Result<ExtractionResult, SelectorError> {
        let selector = compile_selector(selector)?;
        let doc = Html::parse_document(document);
        let matches = doc
            .select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect();
        Ok(ExtractionResult::new(matches))
    }
}
