use pretty_assertions::assert_eq;
use watcher_engine::{Extractor, ScraperExtractor, SelectorError};

const PAGE: &str = r#"
<html><head><title>Shop</title></head>
<body>
  <p id="status">  Hello
World  </p>
  <ul class="offers">
    <li>First <b>deal</b></li>
    <li>Second deal</li>
    <li>
       Third
       deal
    </li>
  </ul>
</body></html>
"#;

#[test]
fn path_selector_extracts_status_text() {
    let result = ScraperExtractor
        .extract(PAGE, "//p[@id='status']")
        .expect("extract");
    assert_eq!(result.matches, vec!["  Hello\nWorld  ".to_string()]);
}

#[test]
fn matches_keep_document_order_for_first_and_last() {
    let result = ScraperExtractor.extract(PAGE, "//ul/li").unwrap();
    assert_eq!(result.matches.len(), 3);
    assert_eq!(result.select(false), Some("First deal"));
    assert!(result.select(true).unwrap().contains("Third"));
}

#[test]
fn css_selector_is_supported() {
    let result = ScraperExtractor.extract(PAGE, "ul.offers > li:nth-of-type(2)").unwrap();
    assert_eq!(result.matches, vec!["Second deal".to_string()]);
}

#[test]
fn unmatched_selector_yields_empty_result() {
    let result = ScraperExtractor.extract(PAGE, "//p[@id='missing']").unwrap();
    assert!(result.is_empty());
    assert_eq!(result.select(true), None);
}

#[test]
fn malformed_markup_still_extracts() {
    let result = ScraperExtractor
        .extract("<div><p id=status>open <b>tags", "//p[@id='status']")
        .unwrap();
    assert_eq!(result.matches, vec!["open tags".to_string()]);
}

#[test]
fn bad_selector_is_an_error_not_an_empty_match() {
    let err = ScraperExtractor.extract(PAGE, "//p[").unwrap_err();
    assert!(matches!(err, SelectorError::UnsupportedPath { .. }));

    let err = ScraperExtractor.extract(PAGE, "p[id=").unwrap_err();
    assert!(matches!(err, SelectorError::Invalid { .. }));
}
