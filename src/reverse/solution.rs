//! Preimage representation for solved inversion problems

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A verified preimage of the target terminal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preimage {
    /// The reconstructed input string.
    pub input: String,
    /// The input as the sequence of alphabet tokens the hash consumed.
    pub symbols: Vec<String>,
    /// The terminal state this input hashes to.
    pub terminal_state: i64,
    /// Accumulator states from the initial state through every symbol.
    pub state_path: Vec<i64>,
    /// Time taken by the search that produced this preimage.
    #[serde(skip)]
    pub solve_time: Duration,
    /// Metadata about the preimage.
    pub metadata: PreimageMetadata,
}

/// Metadata about a preimage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreimageMetadata {
    /// Unique identifier derived from the input string.
    pub id: String,
    /// Number of symbols consumed.
    pub symbol_count: usize,
    /// Number of distinct alphabet tokens used.
    pub distinct_symbols: usize,
}

impl Preimage {
    /// Create a new preimage
    pub fn new(
        input: String,
        terminal_state: i64,
        symbols: Vec<String>,
        state_path: Vec<i64>,
        solve_time: Duration,
    ) -> Self {
        let metadata = PreimageMetadata::analyze(&input, &symbols);

        Self {
            input,
            symbols,
            terminal_state,
            state_path,
            solve_time,
            metadata,
        }
    }

    /// Length of the preimage in symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the preimage consumed no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get a summary of the preimage
    pub fn summary(&self) -> PreimageSummary {
        PreimageSummary {
            id: self.metadata.id.clone(),
            input: self.input.clone(),
            symbol_count: self.metadata.symbol_count,
            terminal_state: self.terminal_state,
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save to file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl PreimageMetadata {
    /// Analyze a preimage and create metadata
    pub fn analyze(input: &str, symbols: &[String]) -> Self {
        let id = Self::generate_id(input);
        let distinct_symbols = symbols
            .iter()
            .collect::<std::collections::HashSet<_>>()
            .len();

        Self {
            id,
            symbol_count: symbols.len(),
            distinct_symbols,
        }
    }

    /// Generate a unique ID for the preimage based on its input string
    fn generate_id(input: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        input.hash(&mut hasher);

        format!("pre_{:x}", hasher.finish())
    }
}

/// Summary of a preimage for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreimageSummary {
    pub id: String,
    pub input: String,
    pub symbol_count: usize,
    pub terminal_state: i64,
    pub solve_time_ms: u64,
}

impl std::fmt::Display for PreimageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Preimage {}: \"{}\" ({} symbols) -> {}, {}ms",
            self.id, self.input, self.symbol_count, self.terminal_state, self.solve_time_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Preimage {
        Preimage::new(
            "aaa".to_string(),
            1205,
            vec!["a".to_string(), "a".to_string(), "a".to_string()],
            vec![0, 5, 80, 1205],
            Duration::from_millis(12),
        )
    }

    #[test]
    fn test_preimage_creation() {
        let preimage = sample();

        assert_eq!(preimage.len(), 3);
        assert!(!preimage.is_empty());
        assert_eq!(preimage.metadata.symbol_count, 3);
        assert_eq!(preimage.metadata.distinct_symbols, 1);
        assert!(!preimage.metadata.id.is_empty());
    }

    #[test]
    fn test_identical_inputs_share_an_id() {
        let first = sample();
        let second = sample();
        assert_eq!(first.metadata.id, second.metadata.id);
    }

    #[test]
    fn test_json_round_trip() {
        let preimage = sample();
        let json = preimage.to_json().unwrap();
        let restored = Preimage::from_json(&json).unwrap();

        assert_eq!(restored.input, preimage.input);
        assert_eq!(restored.state_path, preimage.state_path);
        assert_eq!(restored.metadata.id, preimage.metadata.id);
        // solve_time is skipped during serialization.
        assert_eq!(restored.solve_time, Duration::default());
    }

    #[test]
    fn test_summary_display() {
        let summary = sample().summary();
        let rendered = summary.to_string();

        assert!(rendered.contains("aaa"));
        assert!(rendered.contains("1205"));
    }
}
