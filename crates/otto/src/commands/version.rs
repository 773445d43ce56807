pub fn run() -> anyhow::Result<()> {
    println!("otto {}", env!("CARGO_PKG_VERSION"));
    println!("Temporal resolution and context compression for the Otto voice agent");
    Ok(())
}
