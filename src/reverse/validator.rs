//! Forward verification of candidate preimages

use crate::fold_hash::FoldHash;
use anyhow::Result;

/// Re-hashes candidate inputs forward and compares the result against the
/// terminal state the search was asked to invert.
pub struct PreimageValidator {
    hash: FoldHash,
    terminal_state: i64,
    initial_state: i64,
}

/// Result of validating a single candidate
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// The candidate split into alphabet tokens.
    pub tokens: Vec<String>,
    /// Accumulator states from the initial state through every token.
    pub state_path: Vec<i64>,
    pub error_message: Option<String>,
}

impl PreimageValidator {
    /// Create a new preimage validator
    pub fn new(hash: FoldHash, terminal_state: i64, initial_state: i64) -> Self {
        Self {
            hash,
            terminal_state,
            initial_state,
        }
    }

    /// Tokenize and forward-hash a candidate, comparing the final state
    /// against the terminal state.
    pub fn validate(&self, input: &str) -> Result<ValidationResult> {
        let tokens = self.hash.tokenize(input)?;
        let state_path = self.hash.trajectory(input, self.initial_state)?;
        let final_state = state_path.last().copied().unwrap_or(self.initial_state);

        let is_valid = final_state == self.terminal_state;
        let error_message = if is_valid {
            None
        } else {
            Some(format!(
                "forward hash of \"{}\" is {}, expected {}",
                input, final_state, self.terminal_state
            ))
        };

        Ok(ValidationResult {
            is_valid,
            tokens,
            state_path,
            error_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn validator() -> PreimageValidator {
        let settings = Settings::default();
        let hash = FoldHash::from_config(&settings.hash).unwrap();
        PreimageValidator::new(
            hash,
            settings.search.terminal_state,
            settings.search.initial_state,
        )
    }

    #[test]
    fn test_valid_candidate() {
        let result = validator().validate("aaa").unwrap();

        assert!(result.is_valid);
        assert_eq!(result.tokens, vec!["a", "a", "a"]);
        assert_eq!(result.state_path, vec![0, 5, 80, 1205]);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_wrong_candidate_is_reported() {
        let result = validator().validate("aab").unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.state_path.last(), Some(&1210));
        assert!(result.error_message.unwrap().contains("1210"));
    }

    #[test]
    fn test_untokenizable_candidate_is_an_error() {
        assert!(validator().validate("axa").is_err());
    }
}
