use crate::config::AppConfig;
use otto_temporal::{is_iso_date, resolve_date};

pub fn run(
    phrase: &[String],
    year: Option<i32>,
    today: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let ctx = super::date_context(today, year, config)?;
    let input = phrase.join(" ");
    let resolved = resolve_date(&input, &ctx);

    println!("{}", resolved);
    if !is_iso_date(&resolved) {
        eprintln!("note: {:?} was not recognized and was passed through", input);
    }
    Ok(())
}
