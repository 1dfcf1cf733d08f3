use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use kwestionariusz::{
    api::Submission,
    backend::Backend,
    config::Config,
    export::{self, Exported, Exporter, Selector},
    record::{ResponseRecord, ResponseSummary},
    store::responses,
};
use tokio::io::AsyncReadExt as _;
use tracing::{error, info};

#[derive(Parser)]
struct Opts {
    #[clap(flatten)]
    store: StoreOpts,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct StoreOpts {
    #[clap(short, long, env = "KWESTIONARIUSZ_CONFIG")]
    config: Option<PathBuf>,
    #[clap(long, env = "TURSO_DB_URL")]
    db_url: Option<String>,
    #[clap(long, env = "TURSO_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,
    /// Use a local SQLite database instead of Turso, e.g. `sqlite://responses.db`.
    #[clap(long)]
    sqlite: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create the responses table if it does not exist.
    Init,
    /// Store a submission read from a JSON file, `-` for stdin.
    Submit { input: PathBuf },
    List {
        /// Include parsed answers.
        #[clap(long)]
        full: bool,
    },
    Show { id: i64 },
    Delete { id: i64 },
    /// Render one record to .docx, or several into a .zip.
    Export {
        #[clap(long, conflicts_with = "ids")]
        id: Option<i64>,
        /// Comma separated ids.
        #[clap(long)]
        ids: Option<String>,
        #[clap(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Render a record JSON file without a store.
    Render {
        record: PathBuf,
        #[clap(short, long, default_value = ".")]
        out: PathBuf,
    },
}

async fn load_config(opts: &StoreOpts) -> anyhow::Result<Config> {
    match &opts.config {
        Some(path) => Config::load(path)
            .await
            .with_context(|| format!("load config from {}", path.display())),
        None => Config::from_values(
            opts.sqlite.clone(),
            opts.db_url.clone(),
            opts.auth_token.clone(),
        )
        .with_context(|| "configure store"),
    }
}

async fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut buffer = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buffer)
            .await
            .with_context(|| "read stdin")?;
        return Ok(buffer);
    }
    tokio::fs::read(input)
        .await
        .with_context(|| format!("read {}", input.display()))
}

async fn write_output(out: &Path, exported: Exported) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("create {}", out.display()))?;
    let path = out.join(&exported.filename);
    tokio::fs::write(&path, &exported.bytes)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = exported.bytes.len(), "wrote file");
    println!("{}", path.display());
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| "encode output")?
    );
    Ok(())
}

async fn render(record: &Path, out: &Path) -> anyhow::Result<()> {
    let text = read_input(record).await?;
    let record: ResponseRecord = serde_json::from_slice(&text)
        .with_context(|| format!("parse record from {}", record.display()))?;
    let exported = export::export_record(&record).with_context(|| "render record")?;
    write_output(out, exported).await
}

async fn run(opts: Opts) -> anyhow::Result<()> {
    let command = match opts.command {
        Command::Render { record, out } => return render(&record, &out).await,
        command => command,
    };
    let config = load_config(&opts.store).await?;
    let store = Backend::connect(&config.store)
        .await
        .with_context(|| "connect to store")?;
    responses::init_schema(&store)
        .await
        .with_context(|| "initialize schema")?;

    match command {
        Command::Init => info!("schema ready"),
        Command::Submit { input } => {
            let body = read_input(&input).await?;
            let submission = Submission::parse::<kwestionariusz::backend::Error>(&body)
                .with_context(|| format!("parse submission from {}", input.display()))?;
            let db_id = responses::insert(
                &store,
                submission.ext_id.as_deref(),
                &submission.ts,
                &submission.answers,
            )
            .await
            .with_context(|| "store submission")?;
            print_json(&serde_json::json!({ "ok": true, "db_id": db_id }))?;
        }
        Command::List { full } => {
            let items = if full {
                responses::fetch_all(&store)
                    .await
                    .map(|records| records.into_iter().map(ResponseSummary::from_record).collect())
            } else {
                responses::list(&store).await
            }
            .with_context(|| "list responses")?;
            print_json(&serde_json::json!({ "total": items.len(), "items": items }))?;
        }
        Command::Show { id } => {
            let record = responses::fetch_one(&store, id)
                .await
                .with_context(|| format!("fetch response {id}"))?
                .with_context(|| format!("response {id} not found"))?;
            print_json(&record)?;
        }
        Command::Delete { id } => {
            let deleted = responses::delete(&store, id)
                .await
                .with_context(|| format!("delete response {id}"))?;
            anyhow::ensure!(deleted, "response {id} not found");
            info!(id, "deleted response");
        }
        Command::Export { id, ids, out } => {
            let exporter = Exporter::new(&store);
            let exported = match (id, ids) {
                (Some(id), _) => exporter.export_by_id(id).await,
                (None, Some(ids)) => match Selector::parse_ids(&ids) {
                    Ok(selector) => exporter.export_many(&selector, Utc::now().date_naive()).await,
                    Err(err) => Err(err),
                },
                (None, None) => {
                    exporter
                        .export_many(&Selector::All, Utc::now().date_naive())
                        .await
                }
            }
            .with_context(|| "export responses")?;
            write_output(&out, exported).await?;
        }
        Command::Render { record, out } => render(&record, &out).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(opts).await {
        error!(?e, "critical error");
        std::process::exit(1);
    }
}
