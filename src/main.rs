#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = xqueue_submission::run().await {
        eprintln!("xqueue-submission fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
