use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xray_aliases::book::{BookMetadata, BookSettings, UNKNOWN};
use xray_aliases::candidate::generate;
use xray_aliases::persist::{BookId, Persistor};
use xray_aliases::roster::{JsonRosterFile, RosterAliases};
use xray_aliases::settings::Settings;
use xray_aliases::{AliasError, Result};

const USAGE: &str = "\
usage: xray-aliases [--config FILE] <command>

commands:
    candidates <full name>                       print candidate aliases
    reconcile <roster.json>                      print reconciled aliases per label
    update <book> <roster.json> [--url URL] [--overwrite]
                                                 merge a roster into a book's aliases
    serve                                        run the HTTP interface";

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_option(&mut args, "--config");
    let settings = match Settings::load(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&settings, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, mut args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        println!("{USAGE}");
        return Ok(());
    }
    let command = args.remove(0);
    match command.as_str() {
        "candidates" => {
            let name = args.join(" ");
            for candidate in generate(&name) {
                println!("{candidate}");
            }
            Ok(())
        }
        "reconcile" => {
            let path = args.first().ok_or_else(|| usage("missing roster file"))?;
            let roster = JsonRosterFile::new(path).read()?;
            let aliases = RosterAliases::from_roster(&roster);
            println!("{}", serde_json::to_string_pretty(&aliases)?);
            Ok(())
        }
        "update" => update(settings, args),
        "serve" => serve(settings),
        other => Err(usage(&format!("unknown command '{other}'"))),
    }
}

fn update(settings: &Settings, mut args: Vec<String>) -> Result<()> {
    let url = take_option(&mut args, "--url");
    let overwrite = take_flag(&mut args, "--overwrite");
    let (book, roster_path) = match args.as_slice() {
        [book, path] => (
            book.parse::<BookId>().map_err(|e| usage(&format!("invalid book '{book}': {e}")))?,
            path.clone(),
        ),
        _ => return Err(usage("update needs a book and a roster file")),
    };

    let mut persistor = Persistor::new(settings.persistence_mode())?;
    let mut source = JsonRosterFile::new(&roster_path);
    // no remote search from the command line, --url is applied after open
    let mut resolver = |_: &str| -> Option<String> { None };
    let metadata = BookMetadata::new(UNKNOWN, Vec::new());
    let mut book_settings = BookSettings::open(&mut persistor, book, metadata, &mut resolver, &mut source)?;
    if let Some(url) = &url {
        book_settings.set_goodreads_url(url.clone());
    }
    let report = book_settings.update_aliases(&mut source, overwrite)?;
    book_settings.save()?;
    info!(book, labels_added = report.labels_added, aliases_added = report.aliases_added, "book updated");
    println!("{}", serde_json::to_string_pretty(book_settings.state())?);
    Ok(())
}

#[tokio::main]
async fn serve(settings: &Settings) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&settings.listen).await?;
    info!(listen = %settings.listen, "serving");
    axum::serve(listener, xray_aliases::server::router()).await?;
    Ok(())
}

fn usage(message: &str) -> AliasError {
    AliasError::Config(format!("{message}\n{USAGE}"))
}

fn take_option(args: &mut Vec<String>, name: &str) -> Option<String> {
    let position = args.iter().position(|a| a == name)?;
    if position + 1 >= args.len() {
        args.remove(position);
        return None;
    }
    let value = args.remove(position + 1);
    args.remove(position);
    Some(value)
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(position) => {
            args.remove(position);
            true
        }
        None => false,
    }
}
