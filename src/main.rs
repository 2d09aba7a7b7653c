use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use household_merge::app::merge_use_case::MergeUseCase;
use household_merge::config::Config;
use household_merge::constants::DEFAULT_OUTPUT_FILE;
use household_merge::infra::file_adapter::{FileContactSource, FileMergeSink};
use household_merge::pipeline::processing::emit::render_preview;
use household_merge::validate::validate_fields;
use household_merge::{logging, MergeFields, Pipeline};

#[derive(Parser)]
#[command(name = "household_merge")]
#[command(about = "Turn a household contact export into a mail-merge recipient list")]
#[command(version)]
struct Cli {
    /// Contact table to read, or `-` for stdin
    input: String,

    /// Where to write the merged table, or `-` for stdout
    #[arg(short, long, env = "HOUSEHOLD_MERGE_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: String,

    /// TOML config file (defaults to ./household_merge.toml when present)
    #[arg(long, env = "HOUSEHOLD_MERGE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "HOUSEHOLD_MERGE_CC")]
    cc: Option<String>,

    #[arg(long, env = "HOUSEHOLD_MERGE_BCC")]
    bcc: Option<String>,

    #[arg(long, env = "HOUSEHOLD_MERGE_SUBJECT")]
    subject: Option<String>,

    /// Sender address for every message
    #[arg(long, env = "HOUSEHOLD_MERGE_SEND_AS")]
    send_as: Option<String>,

    #[arg(long, env = "HOUSEHOLD_MERGE_ATTACHMENT")]
    attachment: Option<String>,

    /// Name blank-email couples "Alice Smith and Bob Smith"
    #[arg(long, env = "HOUSEHOLD_MERGE_SURNAME_PER_NAME")]
    surname_per_name: bool,

    /// Print the merged table to stderr
    #[arg(long)]
    preview: bool,
}

impl Cli {
    fn merge_fields(&self, base: MergeFields) -> MergeFields {
        MergeFields {
            cc: self.cc.clone().unwrap_or(base.cc),
            bcc: self.bcc.clone().unwrap_or(base.bcc),
            subject: self.subject.clone().unwrap_or(base.subject),
            send_as: self.send_as.clone().unwrap_or(base.send_as),
            attachment: self.attachment.clone().unwrap_or(base.attachment),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(),
    }
    .context("Failed to load configuration")?;

    // Initialize logging
    let _guard = logging::init_logging(&config.logging.dir);

    let fields = cli.merge_fields(config.fields.clone());
    validate_fields(&fields).context("Invalid merge fields")?;
    let surname_per_name = cli.surname_per_name || config.naming.surname_per_name;

    let source = FileContactSource::from_arg(&cli.input, config.input.max_bytes);
    let sink = Arc::new(FileMergeSink::from_arg(&cli.output));
    let use_case = MergeUseCase::new(Pipeline::new(fields, surname_per_name), Box::new(source), sink);

    eprintln!("🔄 Processing {}...", cli.input);
    let result = match use_case.execute().await {
        Ok(result) => result,
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("❌ {}", e);
            if e.is_structural() {
                eprintln!("   No output written to {}", cli.output);
            }
            return Err(e).context("Merge run failed");
        }
    };

    if cli.preview {
        eprintln!("\n{}\n", render_preview(&result.table));
    }

    let stats = &result.stats;
    info!("Run summary: {}", serde_json::to_string(stats)?);
    eprintln!("\n📊 Merge results:");
    eprintln!("   Rows read: {} ({} too short)", stats.rows_read, stats.short_rows);
    eprintln!("   Households: {}", stats.households);
    eprintln!(
        "   Eligible rows: {} ({} children, {} spouses without email dropped)",
        stats.eligible_rows, stats.children_dropped, stats.spouses_dropped
    );
    eprintln!("   Recipients: {} ({} name collisions)", stats.recipients, stats.collisions);
    eprintln!("   Output: {}", cli.output);
    Ok(())
}
