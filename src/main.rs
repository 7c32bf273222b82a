//! Command line driver for grammar description files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser as _, Subcommand};
use grammar::Grammar;
use log::{info, LevelFilter};
use parsegen::{describe, lexer, Lexer, Node, Parser, TokenSource};

#[derive(clap::Parser)]
#[command(name = "ll1", version)]
#[command(about = "Parse grammar description files and the languages they describe")]
struct Args {
    /// Log more, repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tokens of a description file
    Tokens {
        file: PathBuf,
        /// Print every token, including newlines the parser never sees
        #[arg(long)]
        raw: bool,
    },
    /// Print the syntax tree of a description file
    Tree { file: PathBuf },
    /// Print the described grammar with its FIRST and FOLLOW sets and
    /// parsing table
    Analyze { file: PathBuf },
    /// Parse whitespace separated words with the described grammar
    Run { grammar: PathBuf, input: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    match args.command {
        Command::Tokens { file, raw } => tokens(&file, raw),
        Command::Tree { file } => tree(&file),
        Command::Analyze { file } => analyze(&file),
        Command::Run { grammar, input } => run(&grammar, &input),
    }
}

/// Warnings by default, `-v` steps up to trace. `RUST_LOG` overrides both.
fn init_logger(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}

fn tokens(path: &Path, raw: bool) -> Result<()> {
    let source = read(path)?;
    if raw {
        for token in lexer::scan(&source) {
            println!("{}", token);
        }
        return Ok(());
    }

    let mut lexer = Lexer::new(&source);
    while lexer.has_next() {
        println!("{}", lexer.next_token());
    }
    Ok(())
}

fn parse_description(path: &Path) -> Result<Node> {
    let source = read(path)?;
    let tree = Parser::meta()?
        .parse(Lexer::new(&source))
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
    Ok(tree)
}

fn tree(path: &Path) -> Result<()> {
    print!("{}", parse_description(path)?);
    Ok(())
}

/// The grammar a description file describes.
fn described(path: &Path) -> Result<Grammar> {
    let tree = parse_description(path)?;
    let grammar = describe::grammar_of(&tree)
        .with_context(|| format!("`{}` does not describe a grammar", path.display()))?;
    info!(
        "`{}` describes {} rules, axiom {}",
        path.display(),
        grammar.rules().len(),
        grammar.axiom()
    );
    Ok(grammar)
}

fn analyze(path: &Path) -> Result<()> {
    let parser = Parser::new(described(path)?)
        .with_context(|| format!("no parsing table for `{}`", path.display()))?;

    print!("{}", parser.grammar());
    println!();
    print!("{}", parser.first());
    println!();
    print!("{}", parser.follow());
    println!();
    print!("{}", parser.table());
    Ok(())
}

fn run(grammar: &Path, input: &Path) -> Result<()> {
    let parser = Parser::new(described(grammar)?)
        .with_context(|| format!("no parser for `{}`", grammar.display()))?;
    let text = read(input)?;
    let tree = parser
        .parse_words(&text)
        .with_context(|| format!("failed to parse `{}`", input.display()))?;
    print!("{}", tree);
    Ok(())
}
