use clap::Parser;
use eyre::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gunw_cli::args::Cli;
use gunw_cli::pipeline;
use gunw_cmr::CmrClient;
use gunw_hyp3::Hyp3Client;
use gunw_sns::SnsPublisher;

fn init_tracing(verbose: u8, json: bool) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// Assumes AWS credentials allowed to publish to the ingest topic.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let credentials = cli.credentials();
    let mut hyp3 = Vec::with_capacity(cli.hyp3_urls.len());
    for url in &cli.hyp3_urls {
        hyp3.push(Hyp3Client::login(url, &cli.auth_url, &credentials, cli.http_retry()).await?);
    }

    let cmr = CmrClient::new(&cli.cmr_domain, cli.http_retry())?;
    let publisher =
        SnsPublisher::for_topic(&cli.topic_arn, &cli.aws_credentials(), cli.sns_retry()).await?;

    let report = pipeline::run(&cli.run_config(), &hyp3, &cmr, &publisher).await?;

    info!(
        topic_arn = %report.topic_arn,
        published = report.products.len(),
        dry_run = report.dry_run,
        "sweep complete"
    );
    Ok(())
}
