mod cli;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use trove::{
    CatalogStore, FacetCounts, FileKvStore, FilterEngine, FilterState, PresetStore, ResourceRecord,
    ResourceType, SearchHistory, codec, page_count, paginate, sort_records,
};

use crate::cli::{CliArgs, Command, FilterArgs, LinkAction, PresetAction, SearchArgs};
use crate::settings::ResolvedSettings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trove=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let settings = settings::load(&args)?;

    match &args.command {
        Command::Search(search) => run_search(&settings, search),
        Command::Facets(facets) => run_facets(&settings, facets),
        Command::Preset { action } => run_preset(&settings, action),
        Command::Link { action } => run_link(&settings, action),
        Command::History { clear } => run_history(*clear),
    }
}

fn run_search(settings: &ResolvedSettings, search: &SearchArgs) -> Result<()> {
    let store = CatalogStore::open(settings.require_catalog()?);
    let snapshot = store
        .snapshot()
        .context("catalog is required for browsing")?;
    let engine = FilterEngine::new(snapshot);

    let state = cli::filter_state(search.query.as_deref(), &search.filter);
    let mut results = engine.apply(&state);
    sort_records(&mut results, state.sort_by);

    let counts = FacetCounts::tally(results.iter().copied());
    let pages = page_count(results.len(), settings.page_size);
    let window = paginate(&results, search.page, settings.page_size);

    for record in window {
        print_record(record);
    }
    println!(
        "page {} of {pages} ({} result{})",
        search.page.max(1),
        counts.all,
        if counts.all == 1 { "" } else { "s" }
    );

    remember_query(&state.search_query);
    Ok(())
}

fn run_facets(settings: &ResolvedSettings, facets: &FilterArgs) -> Result<()> {
    let store = CatalogStore::open(settings.require_catalog()?);
    let snapshot = store
        .snapshot()
        .context("catalog is required for facet counts")?;
    let engine = FilterEngine::new(snapshot);

    let state = cli::filter_state(facets.query.as_deref(), &facets.filter);
    let results = engine.apply(&state);
    let counts = FacetCounts::tally(results.iter().copied());

    println!("all: {}", counts.all);
    for kind in ResourceType::ALL {
        println!(
            "{}: {}",
            kind.as_str(),
            counts.by_type.get(&kind).copied().unwrap_or(0)
        );
    }
    for (category, count) in &counts.by_category {
        println!("category {category}: {count}");
    }
    Ok(())
}

fn run_preset(settings: &ResolvedSettings, action: &PresetAction) -> Result<()> {
    let mut store = PresetStore::new(FileKvStore::for_app()?);
    match action {
        PresetAction::List => {
            for preset in store.list() {
                let marker = if preset.is_default {
                    "built-in"
                } else if preset.is_starred {
                    "starred"
                } else {
                    "user"
                };
                println!(
                    "{}\t{}\t[{marker}]\t{}\tused {}x",
                    preset.id,
                    preset.name,
                    describe(&preset.filter),
                    preset.usage_count
                );
            }
        }
        PresetAction::Save {
            name,
            query,
            filter,
        } => {
            let state = cli::filter_state(query.as_deref(), filter);
            let preset = store
                .save(name, state)
                .context("could not save the preset")?;
            println!("saved {} as {}", preset.name, preset.id);
        }
        PresetAction::Delete { id } => {
            if store.delete(id) {
                println!("deleted {id}");
            } else {
                println!("deleted {id} (not persisted)");
            }
        }
        PresetAction::Use { id } => {
            let Some(preset) = store.get(id).cloned() else {
                anyhow::bail!("no preset with id '{id}'");
            };
            store.record_usage(id);
            println!("{}", codec::shareable_url(&preset.filter, &settings.base_url));
        }
    }
    Ok(())
}

fn run_link(settings: &ResolvedSettings, action: &LinkAction) -> Result<()> {
    match action {
        LinkAction::Encode { query, filter } => {
            let state = cli::filter_state(query.as_deref(), filter);
            println!("{}", codec::shareable_url(&state, &settings.base_url));
        }
        LinkAction::Decode { token } => {
            // Accept either a bare token or a full shared link.
            let token = token
                .split_once("filters=")
                .map_or(token.as_str(), |(_, rest)| {
                    rest.split('&').next().unwrap_or(rest)
                });
            match codec::decode(token) {
                Some(state) => println!("{}", describe(&state)),
                None => println!("token did not decode; no filters applied"),
            }
        }
    }
    Ok(())
}

fn run_history(clear: bool) -> Result<()> {
    let mut history = SearchHistory::new(FileKvStore::for_app()?);
    if clear {
        history.clear();
        println!("search history cleared");
        return Ok(());
    }
    for query in history.recent(10) {
        println!("{query}");
    }
    Ok(())
}

fn print_record(record: &ResourceRecord) {
    println!(
        "{}\t{}/{}\t{}\t{} downloads",
        record.slug,
        record.resource_type.as_str(),
        if record.category.is_empty() {
            "-"
        } else {
            record.category.as_str()
        },
        record.title,
        record.downloads()
    );
}

fn describe(state: &FilterState) -> String {
    let pairs = state.to_query_pairs();
    if pairs.is_empty() {
        return "(no filters)".to_string();
    }
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// History is a convenience feature; never let its persistence block search.
fn remember_query(query: &str) {
    if query.trim().is_empty() {
        return;
    }
    match FileKvStore::for_app() {
        Ok(storage) => {
            SearchHistory::new(storage).record(query);
        }
        Err(err) => warn!(%err, "search history unavailable"),
    }
}
