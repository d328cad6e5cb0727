use homepage_verifier::verify::{self, TARGET_URL};
use homepage_verifier::HeadlessBrowser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> homepage_verifier::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let browser = HeadlessBrowser::builder().headless(true).build().await?;

    let outcome = check_homepage(&browser).await;

    // Release the browser before propagating any failure.
    let closed = browser.close().await;

    if let Err(e) = outcome {
        error!("verification failed: {e}");
        return Err(e);
    }
    closed?;

    info!("homepage verification passed");
    Ok(())
}

async fn check_homepage(browser: &HeadlessBrowser) -> homepage_verifier::Result<()> {
    info!(url = TARGET_URL, "navigating to homepage");
    let page = browser.new_page(TARGET_URL).await?;
    verify::run(&page).await
}
