use anyhow::Context as _;
use chomsky::{grammar::examples, Config, Declarations, Grammar, Stage};
use clap::Parser;
use std::{
    fs,
    io::{self, Read as _},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

/// Convert a context-free grammar into Chomsky normal form.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path of grammar file, or `-` to read from stdin.
    input: Option<PathBuf>,

    /// Convert the built-in sample grammar instead of reading input.
    #[arg(long, conflicts_with = "input")]
    example: bool,

    /// Comma-separated list of non-terminal symbols. Enables strict declarations.
    #[arg(long, value_delimiter = ',')]
    nonterminals: Vec<String>,

    /// Comma-separated list of terminal symbols. Enables strict declarations.
    #[arg(long, value_delimiter = ',')]
    terminals: Vec<String>,

    /// The start symbol (default: the first non-terminal).
    #[arg(long)]
    start: Option<String>,

    /// Keep the empty string in the language when the start symbol derives it.
    #[arg(long)]
    preserve_empty: bool,

    /// Print the grammar after every stage.
    #[arg(long)]
    stages: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::trace!("CLI args = {:?}", args);

    let grammar = load_grammar(&args)?;

    let config = Config::new().preserve_empty_string(args.preserve_empty);
    let cnf = config
        .normalize_with(&grammar, |stage, g| {
            if args.stages || stage == Stage::Input {
                println!("### {}\n{}", stage, g);
            }
        })
        .context("failed to normalize the grammar")?;

    if !args.stages {
        println!("### {}\n{}", Stage::Normalization, *cnf);
    }

    Ok(())
}

fn load_grammar(args: &Args) -> anyhow::Result<Grammar> {
    if args.example {
        return Grammar::define(examples::sample).context("invalid sample grammar");
    }

    let source = match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("during read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("during read stdin")?;
            buf
        }
    };

    // Without declared alphabets, they are inferred from the rules.
    let decls = Declarations {
        nonterminals: args.nonterminals.clone(),
        terminals: args.terminals.clone(),
        start: args.start.clone(),
    };
    Grammar::from_str_with(&source, &decls).context("during construct Grammar")
}
