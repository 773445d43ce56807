use otto_temporal::{is_iso_time, resolve_time};

pub fn run(phrase: &[String]) -> anyhow::Result<()> {
    let input = phrase.join(" ");
    let resolved = resolve_time(&input);

    println!("{}", resolved);
    if !is_iso_time(&resolved) {
        eprintln!("note: {:?} has no am/pm or is malformed; passed through", input);
    }
    Ok(())
}
