//! Wordle Tree - CLI
//!
//! Builds complete Wordle strategy trees, one per opening word, and reports
//! how many guesses each tree needs.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use wordle_tree::{
    commands::{
        BuildConfig, RootFailure, analyze_tree_file, build_roots, compute_scores, prepare_oracle,
        range_roots, resolve_words,
    },
    output::{print_batch_report, print_oracle_report, print_scores_written, print_tree_report},
    solver::HeuristicType,
    wordlists::Dataset,
};

#[derive(Parser)]
#[command(
    name = "wordle_tree",
    about = "Precompute complete Wordle strategy trees from fixed opening words",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word data file with `solutions`, `validWords` and `popularWords`
    #[arg(short, long, global = true, default_value = "data/words.json")]
    data: PathBuf,

    /// Plain text solution list, one word per line (overrides --data)
    #[arg(long, global = true)]
    solutions: Option<PathBuf>,

    /// Plain text list of extra allowed guesses (with --solutions)
    #[arg(long, global = true, requires = "solutions")]
    guesses: Option<PathBuf>,

    /// Persisted score table
    #[arg(long, global = true, default_value = "data/scores.json")]
    scores: PathBuf,

    /// Heuristic: basic, fast (default), safe
    #[arg(short = 'H', long, global = true, default_value = "fast")]
    heuristic: HeuristicType,

    /// Directory trees are written to, one subdirectory per heuristic
    #[arg(short, long, global = true, default_value = "graphs")]
    out: PathBuf,

    /// Print trees instead of writing them
    #[arg(long, global = true)]
    no_save: bool,

    /// Grade words as needed instead of loading the score table
    #[arg(long, global = true)]
    on_demand: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build trees for the words at vocabulary indices [start, end)
    Range {
        start: usize,
        /// Defaults to the end of the vocabulary
        end: Option<usize>,
    },

    /// Build trees for every popular opening word
    Popular,

    /// Build trees for the given opening words
    Words {
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Recompute the score table and write it
    Scores,

    /// Report guess counts for saved trees
    Analyze {
        #[arg(required = true)]
        trees: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dataset = load_dataset(&cli)?;
    let vocabulary = &dataset.vocabulary;

    println!(
        "{} {} solutions, {} allowed guesses",
        "Words:".bright_cyan().bold(),
        vocabulary.solution_count(),
        vocabulary.len()
    );

    let config = BuildConfig {
        heuristic: cli.heuristic,
        save: !cli.no_save,
        output_dir: cli.out.clone(),
        scores_path: Some(cli.scores.clone()),
        on_demand: cli.on_demand,
    };

    match cli.command {
        Commands::Range { start, end } => {
            let end = end.unwrap_or(vocabulary.len());
            let roots: Vec<usize> = range_roots(vocabulary, start, end)?.collect();
            run_build(&roots, Vec::new(), &dataset, &config)
        }
        Commands::Popular => {
            if dataset.popular.is_empty() {
                bail!("{} lists no popular words", cli.data.display());
            }
            run_build(&dataset.popular, Vec::new(), &dataset, &config)
        }
        Commands::Words { words } => {
            let (roots, failed) = resolve_words(vocabulary, &words);
            run_build(&roots, failed, &dataset, &config)
        }
        Commands::Scores => {
            let (_, elapsed) = compute_scores(vocabulary, &cli.scores)?;
            print_scores_written(
                &cli.scores,
                vocabulary.solution_count(),
                vocabulary.len(),
                elapsed,
            );
            Ok(())
        }
        Commands::Analyze { trees } => {
            for path in &trees {
                let report = analyze_tree_file(path, vocabulary)?;
                print_tree_report(&report);
            }
            Ok(())
        }
    }
}

fn load_dataset(cli: &Cli) -> Result<Dataset> {
    match &cli.solutions {
        Some(solutions) => Dataset::from_text_files(solutions.as_path(), cli.guesses.as_deref())
            .with_context(|| format!("Failed to load word lists from {}", solutions.display())),
        None => Dataset::from_json_file(&cli.data)
            .with_context(|| format!("Failed to load word data from {}", cli.data.display())),
    }
}

fn run_build(
    roots: &[usize],
    mut unresolved: Vec<RootFailure>,
    dataset: &Dataset,
    config: &BuildConfig,
) -> Result<()> {
    let (oracle, oracle_report) = prepare_oracle(&dataset.vocabulary, config)?;
    print_oracle_report(&oracle_report);

    let mut report = build_roots(roots, &dataset.vocabulary, &oracle, config)?;
    unresolved.append(&mut report.failed);
    report.failed = unresolved;
    print_batch_report(&report, config);

    if config.save && !report.built.is_empty() {
        let dir = config.output_dir.join(config.heuristic.name());
        println!("Trees written to {}", dir.display().to_string().bright_white());
    }
    Ok(())
}
