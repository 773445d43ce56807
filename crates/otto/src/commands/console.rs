//! Interactive console: type commands instead of speaking them

use crate::config::AppConfig;
use otto_compress::CompressionGate;
use otto_temporal::{resolve_date, resolve_time, DateContext, EventRequest};
use std::io::{BufRead, Write};

const HELP: &str = "\
Available commands:
  date <phrase>                    - Resolve a date phrase
  time <phrase>                    - Resolve a time phrase
  schedule <title> <date> <time>   - Build a calendar event payload
  test-dates                       - Resolve a table of sample phrases
  compress <text>                  - Run text through the compression gate
  help                             - Show this list
  quit                             - Exit";

const SAMPLE_DATES: &[&str] = &[
    "today",
    "tomorrow",
    "January 28th",
    "Feb 15",
    "September 28",
    "next week",
];

#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Console<'a> {
    ctx: DateContext,
    gate: &'a CompressionGate,
}

impl<'a> Console<'a> {
    pub fn new(ctx: DateContext, gate: &'a CompressionGate) -> Self {
        Self { ctx, gate }
    }

    pub fn handle(&self, line: &str) -> Reply {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => Reply::Text(String::new()),
            "quit" | "exit" => Reply::Quit,
            "help" => Reply::Text(HELP.to_string()),
            "date" if !rest.is_empty() => Reply::Text(resolve_date(rest, &self.ctx)),
            "time" if !rest.is_empty() => Reply::Text(resolve_time(rest)),
            "schedule" => self.schedule(rest),
            "test-dates" => Reply::Text(self.test_dates()),
            "compress" if !rest.is_empty() => {
                let result = self
                    .gate
                    .compress_blocking(rest, self.gate.settings().default_aggressiveness);
                Reply::Text(format!("[{}] {}", result.outcome, result.text))
            }
            "date" | "time" | "compress" => Reply::Text(format!("Usage: {} <text>", command)),
            other => Reply::Text(format!(
                "Unknown command: {}\nTry: date, time, schedule, test-dates, compress",
                other
            )),
        }
    }

    /// `schedule <title> <date...> <time>`: the date may span several words
    fn schedule(&self, rest: &str) -> Reply {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        if parts.len() < 3 {
            return Reply::Text(
                "Usage: schedule <title> <date> <time>\nExample: schedule Meeting tomorrow 3pm"
                    .to_string(),
            );
        }
        let title = parts[0];
        let time = parts[parts.len() - 1];
        let date = parts[1..parts.len() - 1].join(" ");

        let request = EventRequest::from_phrases(title, &date, time, &self.ctx);
        let mut text = match request.to_json() {
            Ok(json) => json,
            Err(e) => return Reply::Text(format!("Error: {}", e)),
        };
        if let Err(e) = request.validate() {
            text.push_str(&format!("\nwarning: {}", e));
        }
        Reply::Text(text)
    }

    fn test_dates(&self) -> String {
        let mut lines = vec!["Date parsing results:".to_string()];
        for phrase in SAMPLE_DATES {
            lines.push(format!("  {:20} -> {}", phrase, resolve_date(phrase, &self.ctx)));
        }
        lines.join("\n")
    }
}

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let gate = config.gate();
    let ctx = super::date_context(None, None, config)?;
    let console = Console::new(ctx, &gate);

    println!("{}", "=".repeat(60));
    println!("OTTO CONSOLE MODE");
    println!("{}", "=".repeat(60));
    println!("{}\n", HELP);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("You: ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        match console.handle(&line?) {
            Reply::Quit => {
                println!("Goodbye!");
                break;
            }
            Reply::Text(text) if text.is_empty() => {}
            Reply::Text(text) => println!("Otto: {}\n", text),
        }
    }
    Ok(())
}
