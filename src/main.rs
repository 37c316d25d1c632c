//! Lumisign - put your text on the club sign
//!
//! Prompts for text (or takes it from the command line), enforces the
//! character limit and renders the sign with the configured effect settings.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use lumisign::{DEFAULT_INPUT, DEFAULT_OUTPUT, SignConfig, SignRenderer, SignText};

#[derive(Debug, Parser)]
#[command(name = "lumisign", version, about = "Render text onto an illuminated club sign")]
struct Cli {
    /// Sign text; prompted for when omitted
    text: Vec<String>,

    /// Background photo
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the sign
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible wear and gleams
    #[arg(long)]
    seed: Option<u64>,
}

/// Cut `text` to at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (text[..idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

fn prompt_text(max_chars: usize) -> Result<String> {
    println!("Club Sign Text Editor");
    println!("---------------------");
    println!("Enter the text for your sign (max {max_chars} characters):");
    print!("Text: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read sign text")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SignConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SignConfig::load().context("Failed to load config")?,
    };

    let raw = if cli.text.is_empty() {
        prompt_text(config.max_chars)?
    } else {
        cli.text.join(" ")
    };

    let (text, truncated) = truncate_chars(&raw, config.max_chars);
    if truncated {
        warn!(
            "Text too long ({} chars). Truncating to {} characters.",
            raw.chars().count(),
            config.max_chars
        );
    }
    if text.trim().is_empty() {
        bail!("No text entered");
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let renderer = SignRenderer::new(config);
    let saved = renderer
        .try_render(&SignText::from(text), &cli.input, &cli.output, &mut rng)
        .context("Failed to render sign")?;

    println!("All done! Check {} for your custom sign.", saved.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_chars("OPEN", 20), ("OPEN".to_string(), false));
    }

    #[test]
    fn test_truncate_cuts_at_limit() {
        let (text, cut) = truncate_chars("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 20);
        assert!(cut);
        assert_eq!(text, "ABCDEFGHIJKLMNOPQRST");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let (text, cut) = truncate_chars("ÉÉÉÉ", 2);
        assert!(cut);
        assert_eq!(text, "ÉÉ");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["lumisign"]);
        assert!(cli.text.is_empty());
        assert_eq!(cli.input, PathBuf::from("photo.jpg"));
        assert_eq!(cli.output, PathBuf::from("output.png"));
    }

    #[test]
    fn test_cli_collects_words() {
        let cli = Cli::parse_from(["lumisign", "open", "late", "--seed", "4", "-o", "x.jpg"]);
        assert_eq!(cli.text, vec!["open", "late"]);
        assert_eq!(cli.seed, Some(4));
        assert_eq!(cli.output, PathBuf::from("x.jpg"));
    }
}
