//! Reverse hash problem definition
//!
//! [`reverse_hash`] is the generic inversion contract over any totally
//! ordered state type; [`InversionProblem`] wires a configured fold hash to
//! it and re-verifies every candidate by forward hashing.

use super::explorer::{Explorer, SearchStatistics};
use super::reconstruct::reconstruct_input;
use super::{InputError, Preimage, PreimageValidator};
use crate::config::Settings;
use crate::fold_hash::FoldHash;
use anyhow::{Context, Result};
use std::fmt;
use std::time::Instant;

/// Enumerate every input of bounded length whose forward hash reaches
/// `terminal_state`.
///
/// The search walks the hash backwards from `terminal_state` towards
/// `initial_state`, consuming one alphabet symbol per level.
/// `check_function` computes the probe state for a candidate step without
/// committing to it; the step is taken only when `acceptance_function`
/// admits the probe and the probe has not fallen below `initial_state`
/// under `S`'s ordering.
///
/// Two caller obligations the engine cannot verify: states must move
/// monotonically towards `initial_state` along every valid reverse walk
/// (otherwise pruning may discard solutions), and `check_function` must
/// agree with `reversed_hash_function` on which steps are valid. Panics
/// raised inside the callbacks are not caught.
///
/// The result contains one string per accepting path; duplicates are not
/// removed and the order is unspecified.
pub fn reverse_hash<S, R, C, A>(
    symbols: &[String],
    reversed_hash_function: R,
    check_function: C,
    acceptance_function: A,
    terminal_state: S,
    initial_state: S,
    max_string_length: usize,
) -> Result<Vec<String>, InputError>
where
    S: Clone + Ord + Default + Send + Sync,
    R: Fn(&str, &S) -> S + Sync,
    C: Fn(&str, &S) -> S + Sync,
    A: Fn(&S) -> bool + Sync,
{
    reverse_hash_with_statistics(
        symbols,
        reversed_hash_function,
        check_function,
        acceptance_function,
        terminal_state,
        initial_state,
        max_string_length,
    )
    .map(|(inputs, _)| inputs)
}

/// Like [`reverse_hash`], additionally returning the search statistics.
pub fn reverse_hash_with_statistics<S, R, C, A>(
    symbols: &[String],
    reversed_hash_function: R,
    check_function: C,
    acceptance_function: A,
    terminal_state: S,
    initial_state: S,
    max_string_length: usize,
) -> Result<(Vec<String>, SearchStatistics), InputError>
where
    S: Clone + Ord + Default + Send + Sync,
    R: Fn(&str, &S) -> S + Sync,
    C: Fn(&str, &S) -> S + Sync,
    A: Fn(&S) -> bool + Sync,
{
    if symbols.is_empty() {
        return Err(InputError::EmptyAlphabet);
    }
    if terminal_state == S::default() {
        return Err(InputError::DefaultTerminalState);
    }
    if max_string_length == 0 {
        return Err(InputError::ZeroMaxStringLength);
    }

    let explorer = Explorer::new(
        symbols,
        &reversed_hash_function,
        &check_function,
        &acceptance_function,
        &terminal_state,
        &initial_state,
        max_string_length,
    );
    let exploration = explorer.run();

    let inputs = exploration
        .leaves
        .iter()
        .map(|&leaf| reconstruct_input(&exploration.tree, symbols, leaf))
        .collect();

    Ok((inputs, exploration.statistics))
}

/// A configured inversion problem over the built-in fold hash family.
pub struct InversionProblem {
    settings: Settings,
    hash: FoldHash,
    validator: PreimageValidator,
}

impl InversionProblem {
    /// Create a new inversion problem from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let hash = FoldHash::from_config(&settings.hash)
            .context("Failed to build fold hash from configuration")?;
        let validator = PreimageValidator::new(
            hash.clone(),
            settings.search.terminal_state,
            settings.search.initial_state,
        );

        Ok(Self {
            settings,
            hash,
            validator,
        })
    }

    /// Solve the problem and return all verified preimages.
    pub fn solve(&self) -> Result<Vec<Preimage>> {
        self.solve_with_statistics().map(|(preimages, _)| preimages)
    }

    /// Solve the problem, also returning the search statistics.
    pub fn solve_with_statistics(&self) -> Result<(Vec<Preimage>, SearchStatistics)> {
        let start_time = Instant::now();
        let alphabet = self.hash.alphabet();
        let search = &self.settings.search;

        let (candidates, statistics) = reverse_hash_with_statistics(
            &alphabet,
            |token, state| self.hash.reverse_step(token, *state),
            |token, state| self.hash.check_step(token, *state),
            |state| self.hash.accepts(*state),
            search.terminal_state,
            search.initial_state,
            search.max_string_length,
        )
        .context("Reverse search rejected its input")?;

        let solve_time = start_time.elapsed();

        let mut preimages = Vec::new();
        for candidate in candidates {
            match self.validator.validate(&candidate) {
                Ok(result) if result.is_valid => {
                    preimages.push(Preimage::new(
                        candidate,
                        search.terminal_state,
                        result.tokens,
                        result.state_path,
                        solve_time,
                    ));
                }
                Ok(result) => {
                    eprintln!(
                        "Candidate \"{}\" failed verification: {}",
                        candidate,
                        result
                            .error_message
                            .unwrap_or_else(|| "unknown error".to_string())
                    );
                }
                Err(e) => {
                    eprintln!("Error verifying candidate \"{}\": {}", candidate, e);
                }
            }
        }

        Ok((preimages, statistics))
    }

    /// Upper-bound size of the search the current settings allow.
    pub fn estimate_search_size(&self) -> SearchSizeEstimate {
        let alphabet_size = self.hash.alphabet().len();
        let mut node_upper_bound: u128 = 0;
        let mut level_width: u128 = 1;
        for _ in 0..self.settings.search.max_string_length {
            level_width = level_width.saturating_mul(alphabet_size as u128);
            node_upper_bound = node_upper_bound.saturating_add(level_width);
        }

        SearchSizeEstimate {
            alphabet_size,
            max_string_length: self.settings.search.max_string_length,
            node_upper_bound,
            terminal_divisible_by_scale: self.settings.search.terminal_state % self.hash.scale()
                == 0,
        }
    }

    /// Get the configured hash.
    pub fn hash(&self) -> &FoldHash {
        &self.hash
    }

    /// Get the problem settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Worst-case size of a configured search, before any pruning.
#[derive(Debug, Clone)]
pub struct SearchSizeEstimate {
    pub alphabet_size: usize,
    pub max_string_length: usize,
    /// Sum of |alphabet|^k for k = 1..=max_string_length, saturating.
    pub node_upper_bound: u128,
    /// Whether the terminal state admits even a first reverse step.
    pub terminal_divisible_by_scale: bool,
}

impl fmt::Display for SearchSizeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Size Estimate:")?;
        writeln!(f, "  Alphabet size: {}", self.alphabet_size)?;
        writeln!(f, "  Maximum string length: {}", self.max_string_length)?;
        writeln!(f, "  Node upper bound: {}", self.node_upper_bound)?;
        if self.terminal_divisible_by_scale {
            write!(f, "  Terminal state admits a first reverse step: yes")
        } else {
            write!(
                f,
                "  Terminal state admits a first reverse step: no (search will end immediately)"
            )
        }
    }
}
