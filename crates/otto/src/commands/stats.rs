use crate::config::AppConfig;
use otto_telemetry::{EventSummary, JsonlRecorder};

fn render(summary: &EventSummary) -> String {
    if summary.total == 0 {
        return "No compression events recorded yet.".to_string();
    }

    let mut lines = vec![
        format!("Compression events: {}", summary.total),
        "========================".to_string(),
    ];
    for (outcome, count) in &summary.by_outcome {
        lines.push(format!("  {:<16} {}", outcome, count));
    }
    lines.push(String::new());
    lines.push(format!(
        "Chars: {} in, {} out",
        summary.chars_in, summary.chars_out
    ));
    lines.push(format!("Estimated tokens saved: {}", summary.tokens_saved));
    if let Some(ratio) = summary.mean_ratio {
        lines.push(format!("Mean ratio when compressed: {:.1}x", ratio));
    }
    if summary.failures() > 0 {
        lines.push(format!("Fallbacks after backend failure: {}", summary.failures()));
    }
    lines.join("\n")
}

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let Some(paths) = &config.paths else {
        anyhow::bail!("could not resolve the otto home directory");
    };
    let recorder = JsonlRecorder::from_paths(paths);
    let events = recorder.load()?;
    println!("{}", render(&EventSummary::from_events(&events)));
    Ok(())
}
