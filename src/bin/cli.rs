//! page-scout CLI
//!
//! Opens a page, ranks its clickable candidates against a goal, and
//! optionally clicks one of them.

use anyhow::Context;
use clap::Parser;
use page_scout::{BrowserSession, GoalLexicon, LaunchOptions, Target};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "page-scout", version, about = "Rank and click interactive elements on a page")]
struct Cli {
    /// URL to open
    url: String,

    /// Natural-language goal, e.g. "Select the Burrito Bowl option."
    goal: String,

    /// Launch the browser in headed mode
    #[arg(long)]
    headed: bool,

    /// Show at most this many candidates
    #[arg(long, default_value_t = 20)]
    limit: usize,

    /// JSON file overriding the goal vocabulary
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Click after snapshotting: a candidate id or a CSS selector
    #[arg(long)]
    click: Option<String>,

    /// Emit the full snapshot as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut session = BrowserSession::launch(LaunchOptions::default().headless(!cli.headed))
        .context("Failed to launch browser")?;

    if let Some(path) = &cli.lexicon {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let lexicon: GoalLexicon =
            serde_json::from_str(&raw).context("Failed to parse lexicon file")?;
        session = session.with_lexicon(lexicon);
    }

    session.navigate(&cli.url).with_context(|| format!("Failed to open {}", cli.url))?;
    session.wait_for_navigation().context("Page did not finish loading")?;

    let ctx = session.snapshot(&cli.goal).context("Snapshot failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ctx)?);
    } else {
        println!("{} - {} ({} candidates)", ctx.url(), ctx.title(), ctx.interactive().len());
        for candidate in ctx.interactive().iter().take(cli.limit) {
            println!(
                "  [{:>3}] {:>6.1}  <{}> {}",
                candidate.candidate_id.unwrap_or(0),
                candidate.score,
                candidate.tag,
                candidate.text
            );
        }
    }

    if let Some(spec) = &cli.click {
        let target = match spec.parse::<u32>() {
            Ok(id) => Target::from(id),
            Err(_) => Target::from(spec.as_str()),
        };
        let report = session.executor()?.click(&ctx, &target).context("Click failed")?;
        println!(
            "clicked '{}' via {:?} ({} retries, {} matches)",
            report.selector, report.method, report.retries, report.matches
        );
    }

    Ok(())
}
