use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use ragkb_core::config::Config;
use ragkb_core::traits::Embedder;
use ragkb_core::types::OutcomeTag;
use ragkb_corpus::store::JsonFileStore;
use ragkb_corpus::CorpusManager;
use ragkb_embed::get_default_embedder;
use ragkb_retrieval::{compose_prompt, RetrievalEngine};
use ragkb_vector::VectorIndexHandle;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <seed|add|ingest|stats|search|query|save-pair> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();

    let store_dir: String =
        config.get("data.store_dir").unwrap_or_else(|_| "./data/kb".to_string());
    let batch_size: usize = config.get("embed.batch_size").unwrap_or(16);
    let top_k: usize = config.get("retrieval.top_k").unwrap_or(4);

    let store = JsonFileStore::new(PathBuf::from(&store_dir))?;
    let corpus = Arc::new(CorpusManager::open(Box::new(store)));
    let handle = Arc::new(VectorIndexHandle::new());
    let embedder: Arc<dyn Embedder> = Arc::from(get_default_embedder());
    let engine = RetrievalEngine::new(corpus.clone(), handle, embedder);

    let rt = tokio::runtime::Runtime::new()?;

    match cmd.as_str() {
        "seed" => {
            let seeded = corpus.seed_if_empty()?;
            if seeded > 0 {
                println!("Seeded {} builtin chunks", seeded);
            } else {
                println!("Corpus already populated ({} chunks), nothing seeded", corpus.len());
            }
        }
        "add" => {
            let text = args.join(" ");
            let added = corpus.add_free_text(&text)?;
            rt.block_on(engine.refresh_if_installed(batch_size))?;
            println!("Added {} chunks", added);
        }
        "ingest" => {
            let data_dir = args.get(0).map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: ragkb ingest <dir>");
                std::process::exit(1)
            });
            let files: Vec<PathBuf> = walkdir::WalkDir::new(&data_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
                .map(|e| e.path().to_path_buf())
                .collect();
            if files.is_empty() {
                println!("No .txt files found under {}", data_dir.display());
                return Ok(());
            }
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
                    .progress_chars("#>-"),
            );
            let mut total = 0usize;
            for file in &files {
                let content = std::fs::read_to_string(file)?;
                match corpus.add_free_text(&content) {
                    Ok(n) => total += n,
                    Err(e) => tracing::warn!("skipping {}: {e}", file.display()),
                }
                pb.inc(1);
            }
            pb.finish_with_message("done");
            rt.block_on(engine.refresh_if_installed(batch_size))?;
            println!("Ingested {} chunks from {} files", total, files.len());
        }
        "stats" => {
            let stats = corpus.stats();
            println!("Builtin chunks: {}", stats.builtin);
            println!("User chunks:    {}", stats.user);
            println!("Total:          {}", stats.total());
        }
        "search" => {
            let query = require_query(&args, "search");
            let k = positionals(&args).get(1).and_then(|s| s.parse().ok()).unwrap_or(top_k);
            let hits = rt.block_on(engine.search(&query, k));
            if hits.is_empty() {
                println!("No results");
            }
            for hit in hits {
                println!("[{:.4}] {} ({})", hit.score, hit.id, hit.source.label());
                println!("{}\n", hit.text);
            }
        }
        "query" => {
            let query = require_query(&args, "query");
            let semantic = args.iter().any(|a| a == "--semantic");
            if semantic {
                let indexed = rt.block_on(engine.rebuild_vector_index(batch_size))?;
                println!("Vector index ready ({} chunks)", indexed);
            }
            let context = rt.block_on(engine.retrieve_context(&query, top_k));
            if context.is_empty() {
                println!("(no relevant context; prompt is the bare question)");
            }
            println!("{}", compose_prompt(&context, &query));
        }
        "save-pair" => {
            if args.len() < 3 {
                eprintln!("Usage: ragkb save-pair <helpful|not-helpful> <question> <answer>");
                std::process::exit(1);
            }
            let outcome = match args[0].as_str() {
                "helpful" => OutcomeTag::Helpful,
                _ => OutcomeTag::NotHelpful,
            };
            corpus.save_qa_pair(&args[1], &args[2], outcome)?;
            println!("Saved QA pair");
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Arguments that are not `--flags`, in order.
fn positionals(args: &[String]) -> Vec<&String> {
    args.iter().filter(|a| !a.starts_with("--")).collect()
}

fn require_query(args: &[String], cmd: &str) -> String {
    positionals(args).first().map(|s| (*s).clone()).unwrap_or_else(|| {
        eprintln!("Usage: ragkb {} \"<query>\"", cmd);
        std::process::exit(1)
    })
}

#[cfg(test)]
mod tests {
    use super::positionals;

    #[test]
    fn flags_never_shift_positional_arguments() {
        let args: Vec<String> =
            ["--semantic", "dragon lore", "7"].iter().map(|s| s.to_string()).collect();
        let pos = positionals(&args);
        assert_eq!(pos[0], "dragon lore", "query is the first non-flag argument");
        assert_eq!(pos.get(1).and_then(|s| s.parse::<usize>().ok()), Some(7));
    }

    #[test]
    fn missing_k_falls_through() {
        let args: Vec<String> = ["dragon lore", "--semantic"].iter().map(|s| s.to_string()).collect();
        let pos = positionals(&args);
        assert_eq!(pos.len(), 1);
        assert_eq!(pos.get(1).and_then(|s| s.parse::<usize>().ok()), None);
    }
}
