/// Texts of every element the selector matched, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionResult {
    pub matches: Vec<String>,
}

impl ExtractionResult {
    pub fn new(matches: Vec<String>) -> Self {
        Self { matches }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn select(&self, last: bool) -> Option<&str> {
        let picked = if last {
            self.matches.last()
        } else {
            self.matches.first()
        };
        picked.map(String::as_str)
    }
}
