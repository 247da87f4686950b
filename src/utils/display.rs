//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::reverse::Preimage;
use anyhow::Result;
use itertools::Itertools;
use std::path::Path;

/// Format preimages for display
pub struct PreimageFormatter;

impl PreimageFormatter {
    /// Format a single preimage for console output
    pub fn format_preimage(preimage: &Preimage, show_states: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Preimage {} ===\n", preimage.metadata.id));
        output.push_str(&format!("Input: \"{}\"\n", preimage.input));
        output.push_str(&format!(
            "Symbols: {}\n",
            preimage.symbols.iter().join(" ")
        ));
        output.push_str(&format!(
            "Length: {} symbols ({} distinct)\n",
            preimage.metadata.symbol_count, preimage.metadata.distinct_symbols
        ));
        output.push_str(&format!("Terminal state: {}\n", preimage.terminal_state));
        output.push_str(&format!(
            "Solve Time: {:.3}s\n",
            preimage.solve_time.as_secs_f64()
        ));

        if show_states {
            output.push_str(&format!(
                "States: {}\n",
                preimage.state_path.iter().join(" -> ")
            ));
        }

        output
    }

    /// Format multiple preimages as a summary table
    pub fn format_summary(preimages: &[Preimage]) -> String {
        let mut output = String::new();

        output.push_str("Preimage Summary:\n");
        output.push_str("ID           | Length | Time(ms) | Input\n");
        output.push_str("-------------|--------|----------|----------\n");

        for preimage in preimages {
            output.push_str(&format!(
                "{:12} | {:6} | {:8} | {}\n",
                &preimage.metadata.id[..12.min(preimage.metadata.id.len())],
                preimage.metadata.symbol_count,
                preimage.solve_time.as_millis(),
                preimage.input
            ));
        }

        output
    }

    /// Save preimages to files based on output format
    pub fn save_preimages<P: AsRef<Path>>(
        preimages: &[Preimage],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        match format {
            OutputFormat::Text => {
                for (i, preimage) in preimages.iter().enumerate() {
                    let filename = format!("preimage_{:03}.txt", i + 1);
                    let content = Self::format_preimage(preimage, true);
                    std::fs::write(output_dir.join(filename), content)?;
                }
            }
            OutputFormat::Json => {
                for (i, preimage) in preimages.iter().enumerate() {
                    let filename = format!("preimage_{:03}.json", i + 1);
                    preimage.save_to_file(output_dir.join(filename))?;
                }

                // Also save a summary file
                let summaries: Vec<_> = preimages.iter().map(|p| p.summary()).collect();
                let summary_json = serde_json::to_string_pretty(&summaries)?;
                std::fs::write(output_dir.join("preimages_summary.json"), summary_json)?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    fn paint(text: &str, code: u8) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    /// Check if the terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::paint(text, 32)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::paint(text, 31)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::paint(text, 33)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::paint(text, 34)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample() -> Preimage {
        Preimage::new(
            "ab".to_string(),
            85,
            vec!["a".to_string(), "b".to_string()],
            vec![0, 5, 85],
            Duration::from_millis(3),
        )
    }

    #[test]
    fn test_preimage_formatting() {
        let rendered = PreimageFormatter::format_preimage(&sample(), true);

        assert!(rendered.contains("\"ab\""));
        assert!(rendered.contains("a b"));
        assert!(rendered.contains("0 -> 5 -> 85"));
    }

    #[test]
    fn test_summary_contains_every_input() {
        let preimages = vec![sample(), sample()];
        let rendered = PreimageFormatter::format_summary(&preimages);

        let rows = rendered.lines().filter(|line| line.ends_with("| ab"));
        assert_eq!(rows.count(), 2);
    }

    #[test]
    fn test_save_preimages_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let preimages = vec![sample()];

        PreimageFormatter::save_preimages(&preimages, dir.path(), &OutputFormat::Text).unwrap();
        assert!(dir.path().join("preimage_001.txt").exists());

        PreimageFormatter::save_preimages(&preimages, dir.path(), &OutputFormat::Json).unwrap();
        assert!(dir.path().join("preimage_001.json").exists());
        assert!(dir.path().join("preimages_summary.json").exists());
    }

    #[test]
    fn test_color_output() {
        let success = ColorOutput::success("OK");
        // Should either be colored or plain text
        assert!(success.contains("OK"));
    }
}
