use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gaugetags::{
    apis::SubgraphClient,
    config::load_config_from_path,
    errors::TagError,
    gauges::{DescriptorRecord, TagService},
    logger::{self, LogTag, LoggerConfig},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "gaugetags")]
#[command(about = "Address tags for Balancer liquidity gauges", long_about = None)]
struct Args {
    /// Decimal chain id, e.g. 10 for Optimism
    chain_id: String,

    /// Subgraph gateway API key
    #[arg(long)]
    api_key: String,

    /// Path to the TOML configuration file
    #[arg(long, default_value = gaugetags::config::CONFIG_FILE_PATH)]
    config: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print request statistics after the run
    #[arg(long)]
    stats: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Trace everything
    #[arg(long)]
    verbose: bool,

    #[arg(long = "debug-api")]
    debug_api: bool,

    #[arg(long = "debug-snapshot")]
    debug_snapshot: bool,

    #[arg(long = "debug-paginator")]
    debug_paginator: bool,

    #[arg(long = "debug-tags")]
    debug_tags: bool,

    #[arg(long = "debug-config")]
    debug_config: bool,
}

impl Args {
    fn logger_config(&self) -> LoggerConfig {
        let mut config = if self.quiet {
            LoggerConfig::quiet()
        } else {
            LoggerConfig::default()
        };

        let flags = [
            (self.debug_api, LogTag::Api),
            (self.debug_snapshot, LogTag::Snapshot),
            (self.debug_paginator, LogTag::Paginator),
            (self.debug_tags, LogTag::Tags),
            (self.debug_config, LogTag::Config),
        ];
        for (enabled, tag) in flags {
            if enabled {
                config = config.with_debug(tag);
            }
        }

        if self.verbose {
            config = config.with_verbose();
        }
        config
    }
}

fn render_table(records: &[DescriptorRecord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Contract Address", "Public Name Tag", "Public Note"]);

    for record in records {
        table.add_row(vec![
            record.contract_address.as_str(),
            record.public_name_tag.as_str(),
            record.public_note.as_str(),
        ]);
    }
    table.to_string()
}

async fn run(args: &Args) -> Result<()> {
    let config = load_config_from_path(&args.config).context("Failed to load configuration")?;

    let client = Arc::new(
        SubgraphClient::new(Duration::from_secs(config.query.timeout_secs))
            .context("Failed to create subgraph client")?,
    );
    let service = TagService::from_config(&config, client.clone())?;

    let outcome = service.return_tags(&args.chain_id, &args.api_key).await;

    if args.stats {
        let stats = client.get_stats().await;
        logger::info(
            LogTag::Api,
            &format!(
                "Requests: {} ok / {} failed ({:.1}% success), avg {:.0}ms",
                stats.successful_requests,
                stats.failed_requests,
                stats.success_rate(),
                stats.average_response_time_ms
            ),
        );
    }

    let records = outcome.with_context(|| format!("Failed to build tags for chain {}", args.chain_id))?;

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&records).context("Failed to serialize tags")?
            );
        }
        OutputFormat::Table => println!("{}", render_table(&records)),
    }
    Ok(())
}

/// 2 for a rejected chain id or API key, 1 for every other failure
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<TagError>() {
        Some(tag_error) if tag_error.is_input_error() => 2,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init(args.logger_config());

    if let Err(e) = run(&args).await {
        logger::error(LogTag::System, &format!("{:#}", e));
        std::process::exit(exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_exit_with_usage_code() {
        let rejected = Err::<(), _>(TagError::MissingCredential)
            .context("Failed to build tags for chain 10")
            .unwrap_err();
        assert_eq!(exit_code(&rejected), 2);

        let remote = anyhow::Error::new(TagError::Network {
            feed: gaugetags::errors::FeedKind::Gauges,
            reason: "connection refused".to_string(),
        });
        assert_eq!(exit_code(&remote), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("bad config")), 1);
    }

    #[test]
    fn test_debug_flags_map_to_logger_tags() {
        let args = Args::parse_from(["gaugetags", "10", "--api-key", "k1", "--debug-snapshot"]);
        let config = args.logger_config();
        assert!(config.debug_tags.contains(&LogTag::Snapshot.to_debug_key()));
        assert!(!config.debug_tags.contains(&LogTag::Api.to_debug_key()));
    }
}
