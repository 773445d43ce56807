use crate::config::AppConfig;
use anyhow::Context;
use std::io::Read;
use std::path::Path;

pub fn run(
    file: Option<&Path>,
    aggressiveness: Option<f64>,
    min_length: Option<usize>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let mut config = config.clone();
    if let Some(min_length) = min_length {
        config.compression.settings.min_length = min_length;
    }
    let gate = config.gate();
    let aggressiveness = aggressiveness.unwrap_or(gate.settings().default_aggressiveness);

    let result = gate.compress_blocking(&text, aggressiveness);
    print!("{}", result.text);
    if !result.text.ends_with('\n') {
        println!();
    }
    eprintln!(
        "[{}] {} -> {} chars ({:.1}x)",
        result.outcome,
        result.original_chars,
        result.compressed_chars,
        result.ratio()
    );
    Ok(())
}
