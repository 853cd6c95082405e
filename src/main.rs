use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use persona_chat::core::config::{self, CliOverrides, PersonaChatConfig};
use persona_chat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(
    name = "persona-chat",
    version,
    about = "Generate and chat with personas built from Reddit activity"
)]
struct Args {
    /// Backend base URL (overrides config file and PERSONA_CHAT_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Where saved personas are written
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "persona-chat.log")]
    log_file: PathBuf,

    /// Prefill the username field
    #[arg(short, long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            PersonaChatConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            base_url: args.base_url.as_deref(),
            download_dir: args.download_dir.as_deref(),
        },
    );

    log::info!(
        "Persona Chat starting (backend: {}, downloads: {})",
        resolved.base_url,
        resolved.download_dir.display()
    );

    tui::run(resolved, args.username)
}
