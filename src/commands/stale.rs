use tracing::info;

use crate::cli::StaleArgs;
use crate::client::GitHubClient;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::detector::StaleDetector;
use crate::error::Result;
use crate::output;

pub async fn list(config: &Config, args: StaleArgs) -> Result<()> {
    let repo = config.resolve_repository(args.repo.as_deref())?;
    let options = config.resolve_options(args.threshold, args.page_size);
    let client = GitHubClient::new(config.token()?, config.endpoint.clone());

    info!(
        repo = %repo,
        threshold_days = options.threshold_days,
        page_size = options.page_size,
        "scanning open pull requests"
    );

    let stale = StaleDetector::new(&client, &SystemClock)
        .detect(&repo, options)
        .await?;

    output::print_stale(&stale, options.threshold_days);

    Ok(())
}
