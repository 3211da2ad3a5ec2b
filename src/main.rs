use std::fs::File;

use chatbox::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatbox", about = "Terminal chat client for the guided learning backend")]
struct Args {
    /// Role forwarded to the backend (e.g. student)
    #[arg(short, long)]
    role: Option<String>,

    /// Backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Skip the guided questions and start in free-form chat
    #[arg(long)]
    free_form: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Writes to chatbox.log in the current directory; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("chatbox.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("chatbox: {e}");
            std::process::exit(1);
        }
    };

    let overrides = CliOverrides {
        role: args.role,
        base_url: args.base_url,
        free_form: args.free_form,
    };
    let resolved = config::resolve(&file_config, &overrides);
    log::info!(
        "Chatbox starting up (base_url: {}, role: {:?}, free_form: {})",
        resolved.base_url,
        resolved.role,
        resolved.free_form
    );

    chatbox::tui::run(resolved)
}
