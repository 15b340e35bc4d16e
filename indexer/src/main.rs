use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use stemdex_core::ingest::load_corpus;
use stemdex_core::{Corpus, Dictionary, IndexStats, Pipeline, PipelineConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a sort-based inverted index with Porter stemming", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PipelineArgs {
    /// JSON pipeline config (block_size, irregulars, overrides)
    #[arg(long)]
    config: Option<String>,
    /// Sort pairs in blocks of this size and merge the runs
    #[arg(long)]
    block_size: Option<usize>,
    /// Use the built-in irregular stem table (men, feet)
    #[arg(long, default_value_t = false)]
    irregulars: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from input JSON/JSONL files or a directory and print it
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Print the full pipeline output as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Build the index and resolve a single-term query
    Search {
        #[arg(long)]
        input: String,
        #[arg(long)]
        query: String,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Stem words
    Stem {
        words: Vec<String>,
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Run over the built-in five document corpus
    Demo {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, json, pipeline } => {
            let pipeline = make_pipeline(&pipeline)?;
            let corpus = load_corpus(&input)?;
            let run = pipeline.run(&corpus);
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                print_stats(corpus.len(), run.pairs.len(), run.stats());
                print_dictionary(&run.dictionary);
            }
            Ok(())
        }
        Commands::Search { input, query, pipeline } => {
            let pipeline = make_pipeline(&pipeline)?;
            let corpus = load_corpus(&input)?;
            let dictionary = pipeline.build(&corpus);
            print_search(&pipeline, &dictionary, &query);
            Ok(())
        }
        Commands::Stem { words, pipeline } => {
            let pipeline = make_pipeline(&pipeline)?;
            for word in words {
                println!("{word}\t{}", pipeline.stemmer().stem(&word));
            }
            Ok(())
        }
        Commands::Demo { pipeline } => {
            let pipeline = make_pipeline(&pipeline)?;
            let corpus = Corpus::sample();
            tracing::info!(num_docs = corpus.len(), "processing sample corpus");
            let run = pipeline.run(&corpus);
            print_stats(corpus.len(), run.pairs.len(), run.stats());
            for query in ["Romans", "Countrymen", "Caesar", "Brutus"] {
                print_search(&pipeline, &run.dictionary, query);
            }
            Ok(())
        }
    }
}

fn make_pipeline(args: &PipelineArgs) -> Result<Pipeline> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    // flags win over the config file
    if args.block_size.is_some() {
        config.block_size = args.block_size;
    }
    config.irregulars |= args.irregulars;
    Ok(Pipeline::new(config)?)
}

fn print_stats(num_docs: usize, num_pairs: usize, stats: IndexStats) {
    tracing::info!(num_docs, num_pairs, num_terms = stats.num_terms, "index statistics");
    println!("documents: {num_docs}  pairs: {num_pairs}  terms: {}  postings: {}", stats.num_terms, stats.num_postings);
}

fn print_dictionary(dictionary: &Dictionary) {
    for entry in dictionary {
        let postings: Vec<String> = entry.postings.iter().map(|d| d.to_string()).collect();
        println!("{}\t{}\t{}", entry.term, entry.postings.len(), postings.join(","));
    }
}

fn print_search(pipeline: &Pipeline, dictionary: &Dictionary, query: &str) {
    let r = pipeline.resolve(query, dictionary);
    match (&r.term, r.postings.is_empty()) {
        (None, _) => println!("'{query}': no searchable token"),
        (Some(term), true) => println!("'{query}' (stemmed: '{term}'): not found"),
        (Some(term), false) => println!("'{query}' (stemmed: '{term}'): {} documents {:?}", r.postings.len(), r.postings),
    }
}
