mod commands;
mod paths;
mod session;

use std::fs::File;
use std::path::PathBuf;

use docview_lib::ViewConfig;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use commands::Command;
use session::Session;

const USAGE: &str = "usage: docview-cli <documents.json>";

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

fn load_config() -> ViewConfig {
    let Some(path) = paths::config_file().filter(|p| p.exists()) else {
        return ViewConfig::default();
    };
    match ViewConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            eprintln!("Ignoring config {}: {}", path.display(), e);
            log::warn!("Ignoring config {}: {}", path.display(), e);
            ViewConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let Some(fixture) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let documents = match Session::load_fixture(&fixture).await {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} document(s) from {}", documents.len(), fixture.display());

    let session = Session::new(load_config(), documents);
    println!("{}", session.start().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.run(command).await {
            Some(out) => println!("{}", out),
            None => break,
        }
    }
}
