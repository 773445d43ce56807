use crate::config::AppConfig;
use otto_temporal::{DateContext, EventRequest};

pub fn build(
    title: &str,
    date: &str,
    time: &str,
    strict: bool,
    ctx: &DateContext,
) -> anyhow::Result<EventRequest> {
    let request = EventRequest::from_phrases(title, date, time, ctx);
    match request.validate() {
        Ok(()) => {}
        Err(e) if strict => return Err(e.into()),
        Err(e) => tracing::warn!(error = %e, "calendar service may reject this event"),
    }
    Ok(request)
}

pub fn run(
    title: &str,
    date: &str,
    time: &str,
    strict: bool,
    year: Option<i32>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let ctx = super::date_context(None, year, config)?;
    let request = build(title, date, time, strict, &ctx)?;
    println!("{}", request.to_json()?);
    Ok(())
}
