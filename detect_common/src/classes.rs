use std::path::Path;

use anyhow::Context;

/// Class labels loaded once at startup from a darknet `.names` file,
/// one label per line, index-addressed by class id.
#[derive(Debug, Clone, Default)]
pub struct ClassLabels(Vec<String>);

impl ClassLabels {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read class names file {path:?}"))?;
        Ok(Self::parse(&raw))
    }

    pub fn parse(raw: &str) -> Self {
        Self(raw.lines().map(|line| line.trim_end().to_string()).collect())
    }

    /// Label for a class id, `"unknown"` when out of range.
    pub fn name(&self, class_id: usize) -> &str {
        self.0.get(class_id).map(String::as_str).unwrap_or("unknown")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_order() {
        let labels = ClassLabels::parse("person\nbicycle\ncar\n");
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.name(0), "person");
        assert_eq!(labels.name(2), "car");
    }

    #[test]
    fn trims_carriage_returns() {
        let labels = ClassLabels::parse("person\r\nbicycle\r\n");
        assert_eq!(labels.name(1), "bicycle");
    }

    #[test]
    fn out_of_range_is_unknown() {
        let labels = ClassLabels::parse("person\n");
        assert_eq!(labels.name(7), "unknown");
    }

    #[test]
    fn empty_input_is_empty() {
        let labels = ClassLabels::parse("");
        assert!(labels.is_empty());
        assert_eq!(labels.name(0), "unknown");
    }
}
