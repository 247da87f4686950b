//! Configuration management for the fold hash inversion tool

pub mod settings;

pub use settings::{
    CliOverrides, HashConfig, OutputConfig, OutputFormat, SearchConfig, Settings, SymbolSpec,
};
