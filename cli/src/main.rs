use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use search_core::{
    load_documents, Analyzer, AnalyzerConfig, Document, InvertedIndex, MissingTermPolicy, SearchConfig,
    StrategyKind,
};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Load a document dump, build an inverted index and run AND queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path: .xml abstract dump, .json, .jsonl, or a directory of them
    #[arg(long)]
    input: String,
    /// Apply NFKC normalization before tokenizing
    #[arg(long, default_value_t = false)]
    nfkc: bool,
    /// Ignore query terms no document contains instead of returning nothing
    #[arg(long, default_value_t = false)]
    skip_missing: bool,
}

impl CorpusArgs {
    fn search_config(&self) -> SearchConfig {
        let missing_terms = if self.skip_missing { MissingTermPolicy::Skip } else { MissingTermPolicy::Empty };
        SearchConfig { missing_terms }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more queries and print the matching documents
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Strategy: index, substring or regex
        #[arg(long, default_value = "index")]
        strategy: StrategyKind,
        /// Print at most this many documents per query
        #[arg(long, default_value_t = 10)]
        show: usize,
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Time every strategy on the given queries
    Bench {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Runs per query and strategy
        #[arg(long, default_value_t = 10)]
        iterations: u32,
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Print corpus and index sizes
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { corpus, strategy, show, queries } => run_queries(&corpus, strategy, show, &queries),
        Commands::Bench { corpus, iterations, queries } => run_bench(&corpus, iterations.max(1), &queries),
        Commands::Stats { corpus } => {
            let (docs, index, _) = load_and_index(&corpus)?;
            println!("documents: {}", docs.len());
            println!("terms:     {}", index.num_terms());
            println!("postings:  {}", index.num_postings());
            Ok(())
        }
    }
}

fn load_and_index(corpus: &CorpusArgs) -> Result<(Vec<Document>, InvertedIndex, Duration)> {
    let docs = load_documents(&corpus.input)?;
    let start = Instant::now();
    let mut index = InvertedIndex::with_analyzer(Analyzer::new(AnalyzerConfig { unicode_normalization: corpus.nfkc }));
    index.add(&docs);
    let elapsed = start.elapsed();
    tracing::info!(?elapsed, num_docs = docs.len(), num_terms = index.num_terms(), "index built");
    Ok((docs, index, elapsed))
}

fn run_queries(corpus: &CorpusArgs, strategy: StrategyKind, show: usize, queries: &[String]) -> Result<()> {
    let (docs, index, _) = load_and_index(corpus)?;
    let searcher = strategy.searcher(&docs, &index, corpus.search_config());

    for query in queries {
        let start = Instant::now();
        let ids = searcher.search(query)?;
        let elapsed = start.elapsed();
        println!("query {:?} [{}]: {} hits in {:?}", query, searcher.name(), ids.len(), elapsed);
        println!("{:?}", ids);
        for &id in ids.iter().take(show) {
            // Ids are dense load-order positions.
            if let Some(doc) = docs.get(id as usize) {
                println!("{}  {}  {}", doc.id, doc.title, doc.text);
            }
        }
    }
    Ok(())
}

fn run_bench(corpus: &CorpusArgs, iterations: u32, queries: &[String]) -> Result<()> {
    let (docs, index, build) = load_and_index(corpus)?;
    println!("indexed {} documents ({} terms) in {:?}", docs.len(), index.num_terms(), build);
    println!("{:<32} {:<10} {:>8} {:>14}", "query", "strategy", "hits", "avg");

    let config = corpus.search_config();
    for query in queries {
        let mut counts = Vec::with_capacity(StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            let searcher = kind.searcher(&docs, &index, config);
            let mut hits = 0;
            let start = Instant::now();
            for _ in 0..iterations {
                hits = searcher.search(query)?.len();
            }
            let avg = start.elapsed() / iterations;
            println!("{:<32} {:<10} {:>8} {:>14?}", query, kind, hits, avg);
            counts.push(hits);
        }
        let agree = counts.windows(2).all(|w| w[0] == w[1]);
        println!("{:<32} {}", query, if agree { "strategies agree" } else { "strategies DISAGREE on hit count" });
        if !agree {
            tracing::info!(query = %query, ?counts, "strategies disagree on hit count");
        }
    }
    Ok(())
}
