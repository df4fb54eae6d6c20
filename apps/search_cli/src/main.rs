use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{
    load_settings, DisplayState, HttpSearchBackend, QueryController, SearchAddress, SearchBackend,
};
use shared::error::{ApiError, ErrorCode};
use tracing_subscriber::EnvFilter;

mod render;

use render::{render_text, JsonFailure, JsonReport};

#[derive(Parser, Debug)]
#[command(name = "temu-search", version, about = "Search the TəmuSəarch API from a terminal")]
struct Cli {
    /// Base URL of the search API; overrides settings file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a query.
    Search {
        query: String,
        /// Use the LLM enhanced endpoint.
        #[arg(long)]
        llm: bool,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Open a shareable address such as `/results?query=alien&llm=1`.
    Open {
        address: String,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct ViewArgs {
    /// Only show results carrying this tag; repeat to require several.
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,
    /// Print the grouped view as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load search settings")?;
    if let Some(api_url) = &cli.api_url {
        settings = settings.with_api_base_url(api_url);
    }

    let (address, view) = match cli.command {
        Command::Search { query, llm, view } => (SearchAddress::new(query, llm), view),
        Command::Open { address, view } => (SearchAddress::parse(&address), view),
    };

    let (mut controller, request) = QueryController::from_address(address);
    let Some(request) = request else {
        tracing::debug!("blank query, nothing to search");
        return Ok(());
    };
    for tag in &view.tags {
        controller.select_tag(tag);
    }

    let backend = HttpSearchBackend::new(&settings).context("failed to build search client")?;
    let outcome = backend.search(&request.query, request.mode).await;
    controller.complete(request.generation, outcome);

    for stale in controller.stale_selected_tags() {
        tracing::warn!(tag = stale, "selected tag does not occur in these results");
    }

    let display = controller.display();
    if let DisplayState::Failed { message } = &display {
        if view.json {
            let failure = JsonFailure {
                error: failure_of(&controller, message),
            };
            println!("{}", serde_json::to_string_pretty(&failure)?);
        }
        bail!("{message}");
    }

    if view.json {
        let address = request.address();
        let groups = match display {
            DisplayState::Results { groups } => groups,
            _ => Vec::new(),
        };
        let report = JsonReport {
            address: controller.address().unwrap_or(&address),
            tags: controller.tag_universe(),
            selected_tags: controller.selected_tags(),
            groups,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            render_text(
                &display,
                controller.tag_universe(),
                controller.selected_tags(),
                controller.address(),
            )
        );
    }

    Ok(())
}

fn failure_of(controller: &QueryController, message: &str) -> ApiError {
    controller
        .last_error()
        .map(ApiError::from)
        .unwrap_or_else(|| ApiError::new(ErrorCode::Transport, message))
}
