//! Configurable fold hash family and its reverse-step callbacks

use crate::config::{HashConfig, SymbolSpec};
use anyhow::Result;

/// A hash of the form
/// `h(s) = fold(s, initial, |acc, sym| (acc * multiplier + value(sym)) * scale)`.
///
/// One instance provides both directions: the forward digest used for
/// verification, and the reverse/check/accept callbacks the search engine
/// consumes.
#[derive(Debug, Clone)]
pub struct FoldHash {
    multiplier: i64,
    scale: i64,
    symbols: Vec<SymbolSpec>,
}

impl FoldHash {
    /// Build a hash from its configuration section.
    pub fn from_config(config: &HashConfig) -> Result<Self> {
        if config.symbols.is_empty() {
            anyhow::bail!("Hash symbol table cannot be empty");
        }
        if config.multiplier < 1 {
            anyhow::bail!("Hash multiplier must be positive, got {}", config.multiplier);
        }
        if config.scale < 1 {
            anyhow::bail!("Hash scale must be positive, got {}", config.scale);
        }
        for (i, symbol) in config.symbols.iter().enumerate() {
            if symbol.token.is_empty() {
                anyhow::bail!("Symbol {} has an empty token", i);
            }
            if config.symbols[..i].iter().any(|s| s.token == symbol.token) {
                anyhow::bail!("Duplicate symbol token \"{}\"", symbol.token);
            }
        }

        Ok(Self {
            multiplier: config.multiplier,
            scale: config.scale,
            symbols: config.symbols.clone(),
        })
    }

    /// The alphabet in configuration order.
    pub fn alphabet(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.token.clone()).collect()
    }

    /// The per-step accumulator multiplier.
    pub fn multiplier(&self) -> i64 {
        self.multiplier
    }

    /// The per-step post-scale factor.
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Numeric value of a token, failing on tokens outside the alphabet.
    pub fn value_of(&self, token: &str) -> Result<i64> {
        match self.lookup(token) {
            Some(value) => Ok(value),
            None => anyhow::bail!("Unknown symbol \"{}\"", token),
        }
    }

    /// One forward fold step.
    pub fn step(&self, state: i64, value: i64) -> i64 {
        (state * self.multiplier + value) * self.scale
    }

    /// Split an input into alphabet tokens, longest match first.
    pub fn tokenize(&self, input: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        let mut rest = input;

        while !rest.is_empty() {
            let matched = self
                .symbols
                .iter()
                .filter(|symbol| rest.starts_with(symbol.token.as_str()))
                .max_by_key(|symbol| symbol.token.len());

            match matched {
                Some(symbol) => {
                    tokens.push(symbol.token.clone());
                    rest = &rest[symbol.token.len()..];
                }
                None => anyhow::bail!(
                    "Input is not a concatenation of alphabet symbols (stuck at \"{}\")",
                    rest
                ),
            }
        }

        Ok(tokens)
    }

    /// Accumulator states from the initial state through every token of
    /// `input`. The first element is always `initial_state`.
    pub fn trajectory(&self, input: &str, initial_state: i64) -> Result<Vec<i64>> {
        let tokens = self.tokenize(input)?;
        let mut states = Vec::with_capacity(tokens.len() + 1);
        let mut state = initial_state;
        states.push(state);

        for token in &tokens {
            state = self.step(state, self.value_of(token)?);
            states.push(state);
        }

        Ok(states)
    }

    /// Forward digest of `input` from `initial_state`.
    pub fn digest(&self, input: &str, initial_state: i64) -> Result<i64> {
        let states = self.trajectory(input, initial_state)?;
        Ok(states.last().copied().unwrap_or(initial_state))
    }

    /// State one reverse step back after consuming `token`.
    pub fn reverse_step(&self, token: &str, state: i64) -> i64 {
        match self.lookup(token) {
            Some(value) => (state / self.scale - value) / self.multiplier,
            None => i64::MIN,
        }
    }

    /// Probe state for consuming `token` as the next reverse step.
    ///
    /// Returns `i64::MIN` when the step is structurally impossible: the
    /// state is not divisible by the scale, or the token is unknown.
    pub fn check_step(&self, token: &str, state: i64) -> i64 {
        match self.lookup(token) {
            Some(value) if state % self.scale == 0 => state / self.scale - value,
            _ => i64::MIN,
        }
    }

    /// Whether a probe state can lie on a valid reverse walk.
    pub fn accepts(&self, state: i64) -> bool {
        state != i64::MIN && state % self.multiplier == 0
    }

    fn lookup(&self, token: &str) -> Option<i64> {
        self.symbols
            .iter()
            .find(|symbol| symbol.token == token)
            .map(|symbol| symbol.value)
    }
}
