use anyhow::{Context, bail};
use clap::Parser;
use sokoni_search::catalog::{self, TRENDING_SEARCHES};
use sokoni_search::cli::{Cli, Commands, HistoryAction, SearchArgs};
use sokoni_search::format::format_search_results;
use sokoni_search::{FileStore, Item, QueryEngine, RecentSearches, logging};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for results
    logging::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Search(args) => {
            let engine = load_engine(&cli)?;
            run_search(&engine, args, history_store(&cli)?)
        }
        Commands::Suggest { query } => {
            let engine = load_engine(&cli)?;
            let candidates = engine.suggest(query);
            if candidates.is_empty() {
                println!("No completions. Trending: {}", TRENDING_SEARCHES.join(", "));
            }
            for candidate in candidates {
                println!("{candidate}");
            }
            Ok(())
        }
        Commands::History { action } => {
            let mut history = RecentSearches::load(history_store(&cli)?)?;
            match action {
                HistoryAction::List => {
                    for query in history.entries() {
                        println!("{query}");
                    }
                }
                HistoryAction::Clear => {
                    history.clear()?;
                    tracing::info!("Cleared recent searches");
                }
            }
            Ok(())
        }
    }
}

fn load_engine(cli: &Cli) -> anyhow::Result<QueryEngine> {
    if cli.corpus.is_empty() && cli.events.is_empty() {
        bail!("No catalog given. Pass --corpus <FILE> and/or --events <FILE>");
    }

    let mut items: Vec<Item> = Vec::new();
    for path in &cli.corpus {
        items.extend(catalog::load_corpus(path)?);
    }
    for path in &cli.events {
        items.extend(catalog::load_events(path)?);
    }
    Ok(QueryEngine::new(items))
}

fn history_store(cli: &Cli) -> anyhow::Result<FileStore> {
    let dir: PathBuf = match &cli.history_dir {
        Some(dir) => dir.clone(),
        None => FileStore::default_location()
            .context("Could not determine a data directory; pass --history-dir")?,
    };
    Ok(FileStore::new(dir))
}

fn run_search(engine: &QueryEngine, args: &SearchArgs, store: FileStore) -> anyhow::Result<()> {
    let filters = args.filters();
    let result = engine.search(&filters);

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to encode results")?;
        println!("{json}");
    } else {
        print!("{}", format_search_results(&result, &filters.search_term, args.limit));
    }

    let recorded = RecentSearches::load(store).and_then(|mut history| history.record(&args.query));
    if let Err(e) = recorded {
        tracing::warn!("Failed to record recent search: {}", e);
    }
    Ok(())
}
