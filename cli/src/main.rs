//! MoSIS CLI - binary entry point and the line-oriented interview loop.
//!
//! # Architecture
//!
//! The CLI bridges standard input and [`mosis_engine`] (the interview state
//! machine) backed by [`mosis_store::HttpTheoryStore`].
//!
//! ```text
//! main() -> Interview::start() -> loop { prompt, read line, resolve LaTeX,
//!                                        handle_input(), print transcript }
//! ```
//!
//! End of input ends the session.

mod latex;

use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mosis_config::MosisConfig;
use mosis_engine::{Interview, InterviewSettings, JsonExporter, OutputLine, Stream};
use mosis_store::{HttpTheoryStore, StoreSettings};

const DEFAULT_EXPORT_DIR: &str = "mosis-out";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_mosis_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than mixing logs into the interview.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_mosis_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in mosis_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!("Failed to create log dir {}: {e}", parent.display()));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn mosis_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.mosis/logs/mosis.log
    if let Some(config_path) = MosisConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("mosis.log"));
    }

    // Fallback: ./.mosis/logs/mosis.log
    candidates.push(PathBuf::from(".mosis").join("logs").join("mosis.log"));

    candidates
}

fn store_settings(config: Option<&MosisConfig>) -> StoreSettings {
    let mut settings = StoreSettings::default();
    let Some(config) = config else {
        if let Ok(url) = env::var(mosis_config::STORE_URL_ENV)
            && !url.trim().is_empty()
        {
            settings.base_url = url;
        }
        return settings;
    };
    if let Some(url) = config.store_url() {
        settings.base_url = url;
    }
    if let Some(extension) = config.store_extension() {
        settings.extension = extension;
    }
    if let Some(namespace) = config.store_namespace() {
        settings.namespace = namespace;
    }
    if let Some(meta_theory) = config.store_meta_theory() {
        settings.meta_theory = meta_theory;
    }
    if let Some(timeout) = config.store_timeout() {
        settings.timeout = timeout;
    }
    settings
}

fn interview_settings(config: Option<&MosisConfig>) -> InterviewSettings {
    let user = config
        .and_then(MosisConfig::user)
        .or_else(|| env::var("USER").ok().filter(|user| !user.trim().is_empty()));
    let mut settings = user.map_or_else(InterviewSettings::default, InterviewSettings::new);
    settings.publish_model_theories = config.is_some_and(MosisConfig::publish_model_theories);
    settings
}

fn export_directory(config: Option<&MosisConfig>) -> PathBuf {
    config
        .and_then(MosisConfig::export_directory)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
}

fn print_output(lines: Vec<OutputLine>) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        match line.stream {
            Stream::Stdout => writeln!(stdout, "{}", line.text)?,
            Stream::Stderr => {
                stdout.flush()?;
                eprintln!("{}", line.text);
            }
        }
    }
    stdout.flush()
}

fn main() -> Result<()> {
    init_tracing();

    let config = match MosisConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Ignoring config: {err}");
            None
        }
    };
    let store = HttpTheoryStore::new(store_settings(config.as_ref()))
        .context("failed to set up the theory store client")?;
    let settings = interview_settings(config.as_ref());
    let exporter = JsonExporter::new(export_directory(config.as_ref()));

    let mut interview = Interview::new(store, settings, exporter)
        .with_state_change_hook(|stage| tracing::debug!(stage = %stage, "entered stage"));
    if let Err(err) = interview.start() {
        eprintln!("Error: {err:#}");
    }
    print_output(interview.take_output())?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("({}) ", interview.stage());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = latex::resolve(&line.context("failed to read input")?);

        let result = interview.handle_input(&line);
        print_output(interview.take_output())?;
        if let Err(err) = result {
            tracing::warn!("turn failed: {err}");
            eprintln!("Error: {err}");
        }
    }

    println!();
    tracing::info!(stage = %interview.stage(), "session ended");
    Ok(())
}
