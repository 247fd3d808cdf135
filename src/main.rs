// Command line entry point

use anyhow::Result;
use clap::Parser;
use git_anchor::adjust::PositionAdjuster;
use git_anchor::repo::Git2Repo;
use git_anchor::Position;

/// Translate a line/character position from one commit's coordinate space
/// into another's.
#[derive(Parser)]
#[command(name = "ga")]
struct Cli {
    /// Commit-ish the position was computed against (branch, tag, or hash).
    from: String,

    /// Commit-ish to translate the position into.
    to: String,

    /// File path, relative to the repository root.
    path: String,

    /// Line number, 0-indexed.
    line: u32,

    /// Character offset within the line, 0-indexed.
    character: u32,

    /// Translate from `to` back into `from` instead.
    #[arg(short, long)]
    reverse: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let repo = Git2Repo::open(std::env::current_dir()?)?;
    let adjuster = PositionAdjuster::new(&repo, cli.from.clone());

    let pos = Position {
        line: cli.line,
        character: cli.character,
    };

    match adjuster.adjust_position(&cli.to, &cli.path, pos, cli.reverse)? {
        Some((path, adjusted)) => {
            println!("{}:{}:{}", path, adjusted.line, adjusted.character);
        }
        None => {
            eprintln!(
                "No equivalent position: line {} of '{}' was edited between the two commits",
                cli.line, cli.path
            );
        }
    }

    Ok(())
}
