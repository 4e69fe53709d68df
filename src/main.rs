mod app;
mod backend;
mod command;
mod config;
mod constants;
mod input;
mod session;
mod ui;

use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;

fn setup_logging() {
    use std::fs::{self, OpenOptions};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mailchat=debug"));

    // The TUI owns stdout, so logs go to a file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("mailchat.log")))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"mailchat - Chat with AI summaries of your email

Usage: mailchat [command]

Commands:
    (none)      Start the client
    setup       Configure the backend URL and default model
    help        Show this help message

Configuration file: ~/.config/mailchat/config.toml
Log file:           ~/.config/mailchat/mailchat.log
"#
    );
}

/// Prompt on stdout and read one trimmed line
fn prompt(label: &str) -> Result<String> {
    use std::io::{self, Write};

    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn run_setup() -> Result<()> {
    println!("mailchat setup");
    println!("==============\n");

    let config_path = Config::config_path()?;
    let mut config = if config_path.exists() {
        let answer = prompt("Configuration already exists. Overwrite? [y/N]: ")?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
        // Keep settings the prompts below do not cover
        Config::load_from(&config_path).unwrap_or_default()
    } else {
        Config::default()
    };

    let url = loop {
        let url = prompt(&format!("Backend URL [{}]: ", config.backend.url))?;
        if url.is_empty() {
            break config.backend.url.clone();
        }
        if (url.starts_with("http://") || url.starts_with("https://"))
            && url.len() > "https://".len()
        {
            break url;
        }
        println!("Invalid URL. It must start with http:// or https:// (e.g., http://localhost:5000)");
    };
    config.backend.url = url;

    println!("Known models: {}", config.models.candidates().join(", "));
    let model = prompt(&format!("Default model [{}]: ", config.models.default))?;
    if !model.is_empty() {
        config.models.default = model;
    }

    config.ensure_dirs()?;
    config.save()?;
    println!("Configuration saved to {}", config_path.display());
    println!("\nSetup complete! Run 'mailchat' to start.");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            config.ensure_dirs()?;
            tracing::info!(
                "Starting mailchat (backend {}, model {})",
                config.backend.url,
                config.models.initial()
            );

            crate::ui::theme::init_theme(config.ui.theme);

            let mut app = App::new(config)?;
            app.run().await
        }
    }
}
