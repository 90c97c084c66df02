//! GHOSTman - command-line front end for the request-template engine
//!
//! Stands in for the desktop shell: lists templates, shows the pre-filled
//! form, and sends it with optional edits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use ghostman::collection::Catalog;
use ghostman::network::join_result;
use ghostman::{logging, Collection, Config, Dispatcher, RequestForm, Session, Storage};

#[derive(Parser)]
#[command(name = "ghostman", version, about = "Send requests from a Postman-style collection")]
struct Cli {
    /// Config file (default: ~/.ghostman/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Collection file, overrides the config
    #[arg(long, global = true)]
    collection: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List selectable templates
    List {
        /// Only titles containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show the pre-filled form of a template
    Show {
        /// Template id (default: last selected)
        id: Option<String>,
    },
    /// Send a template
    Send(SendArgs),
}

#[derive(Args)]
struct SendArgs {
    /// Template id (default: last selected)
    id: Option<String>,
    #[arg(long)]
    method: Option<String>,
    #[arg(long)]
    url: Option<String>,
    /// Extra `Key: Value` header line; repeatable
    #[arg(long = "header", short = 'H')]
    headers: Vec<String>,
    #[arg(long)]
    body: Option<String>,
    /// Timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(collection) = cli.collection {
        config.collection = collection;
    }
    let _guard = logging::init(&config.log)?;
    tracing::info!(version = ghostman::constants::APP_VERSION, "Starting {}", ghostman::constants::APP_NAME);

    let session = open_session(&config)?;
    let mut storage = Storage::new();

    match cli.command {
        Command::List { filter } => list(session.catalog(), filter.as_deref()),
        Command::Show { id } => {
            let id = select(&session, &mut storage, id)?;
            let entry = session.entry(&id)?;
            let form = session.form(&id)?;
            println!("{}", entry.title);
            if !entry.intro.is_empty() {
                println!("{}", entry.intro);
            }
            println!();
            print_form(&form);
            Ok(())
        }
        Command::Send(args) => send(&session, &mut storage, args).await,
    }
}

/// Load failures leave an empty session so the shell still starts
fn open_session(config: &Config) -> Result<Session> {
    let dispatcher = Dispatcher::new(config.dispatch())?;
    match Session::load(&config.collection, dispatcher.clone()) {
        Ok(session) => Ok(session),
        Err(e) => {
            tracing::error!(error = %e, "Error loading collection");
            eprintln!("cannot load collection: {e}");
            Ok(Session::new(Collection::default(), dispatcher))
        }
    }
}

fn list(catalog: &Catalog, filter: Option<&str>) -> Result<()> {
    for skipped in &catalog.skipped {
        eprintln!("warning: {skipped}");
    }
    let entries = match filter {
        Some(query) => catalog.filter(query),
        None => catalog.iter().collect(),
    };
    for entry in entries {
        println!("{:<24} {:<8} {}", entry.id, entry.template.method(), entry.title);
    }
    Ok(())
}

/// Explicit id, else the stored selection if it still exists, else the first entry
fn select(session: &Session, storage: &mut Storage, id: Option<String>) -> Result<String> {
    let catalog = session.catalog();
    let id = match id {
        Some(id) => id,
        None => match storage.current_template().filter(|id| catalog.get(id).is_some()) {
            Some(id) => id.to_string(),
            None => match catalog.iter().next() {
                Some(entry) => entry.id.clone(),
                None => bail!("collection has no selectable templates"),
            },
        },
    };

    if catalog.get(&id).is_some() {
        if let Err(e) = storage.set_current_template(&id) {
            tracing::warn!(error = %e, "Could not save selected template");
        }
    }
    Ok(id)
}

async fn send(session: &Session, storage: &mut Storage, args: SendArgs) -> Result<()> {
    let id = select(session, storage, args.id)?;
    let mut form = session.form(&id)?;

    if let Some(method) = args.method {
        form.method = method;
    }
    if let Some(url) = args.url {
        form.url = url;
    }
    for line in &args.headers {
        form.headers.push_str(line);
        form.headers.push('\n');
    }
    if let Some(body) = args.body {
        form.body = body;
    }

    let request = session.build(&form)?;
    let handle = session.spawn(request, args.timeout.map(Duration::from_secs));
    let result = join_result(handle.await);

    println!("{}", result.display_text());
    Ok(())
}

fn print_form(form: &RequestForm) {
    println!("{} {}", form.method, form.url);
    print!("{}", form.headers);
    if !form.body.is_empty() {
        println!();
        println!("{}", form.body);
    }
}
