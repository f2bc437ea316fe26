//! Merge configuration.

use crate::content::{BufferedMerger, ContentMerger, StreamingMerger};
use crate::extract::{DependencyExtractor, InMemoryExtractor, StreamingExtractor};

/// Extension of merge candidates when none is configured.
pub const DEFAULT_EXTENSION: &str = "txt";

/// How files are read during extraction and merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Read whole files and write the output in one go
    #[default]
    InMemory,
    /// Read line by line and append to the output incrementally
    Streaming,
}

impl MergeStrategy {
    /// Build the extractor for this strategy.
    pub fn extractor(self) -> Box<dyn DependencyExtractor> {
        match self {
            MergeStrategy::InMemory => Box::new(InMemoryExtractor),
            MergeStrategy::Streaming => Box::new(StreamingExtractor),
        }
    }

    /// Build the content merger for this strategy.
    pub fn content_merger(self) -> Box<dyn ContentMerger> {
        match self {
            MergeStrategy::InMemory => Box::new(BufferedMerger),
            MergeStrategy::Streaming => Box::new(StreamingMerger),
        }
    }
}

impl std::str::FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-memory" | "memory" | "buffered" => Ok(MergeStrategy::InMemory),
            "streaming" | "stream" => Ok(MergeStrategy::Streaming),
            _ => Err(format!(
                "Unknown merge strategy: '{}'. Valid strategies: in-memory, streaming",
                s
            )),
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeStrategy::InMemory => write!(f, "in-memory"),
            MergeStrategy::Streaming => write!(f, "streaming"),
        }
    }
}

/// Options controlling a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Extraction and content strategy
    pub strategy: MergeStrategy,
    /// Also emit discovered files that neither require nor are required by
    /// anything. Off by default: only files touched by a directive are ordered.
    pub include_standalone: bool,
    /// Extension (without the dot) of merge candidates
    pub extension: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            strategy: MergeStrategy::default(),
            include_standalone: false,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl MergeOptions {
    pub fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_include_standalone(mut self, include: bool) -> Self {
        self.include_standalone = include;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_strategy_from_str() {
        assert_eq!(
            "in-memory".parse::<MergeStrategy>().unwrap(),
            MergeStrategy::InMemory
        );
        assert_eq!(
            "BUFFERED".parse::<MergeStrategy>().unwrap(),
            MergeStrategy::InMemory
        );
        assert_eq!(
            "streaming".parse::<MergeStrategy>().unwrap(),
            MergeStrategy::Streaming
        );
        assert_eq!(
            "stream".parse::<MergeStrategy>().unwrap(),
            MergeStrategy::Streaming
        );
        assert!("parallel".parse::<MergeStrategy>().is_err());
    }

    #[test]
    fn test_merge_strategy_display() {
        assert_eq!(format!("{}", MergeStrategy::InMemory), "in-memory");
        assert_eq!(format!("{}", MergeStrategy::Streaming), "streaming");
    }

    #[test]
    fn test_default_options() {
        let options = MergeOptions::default();
        assert_eq!(options.strategy, MergeStrategy::InMemory);
        assert!(!options.include_standalone);
        assert_eq!(options.extension, "txt");
    }

    #[test]
    fn test_builder_methods() {
        let options = MergeOptions::default()
            .with_strategy(MergeStrategy::Streaming)
            .with_include_standalone(true)
            .with_extension(".part");

        assert_eq!(options.strategy, MergeStrategy::Streaming);
        assert!(options.include_standalone);
        assert_eq!(options.extension, "part");
    }
}
