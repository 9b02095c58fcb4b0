use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{Document, DropOutcome, DropPlacement, Pipeline};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Editor tree JSON file
    pub tree: PathBuf,

    /// Index of the top-level table to move
    #[arg(long)]
    pub from: usize,

    /// Index of the top-level table to drop it on
    #[arg(long)]
    pub to: usize,

    /// Drop below the target instead of above it
    #[arg(long)]
    pub after: bool,

    /// Write the edited tree here instead of updating the input in place
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn reorder(args: ReorderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = Document::load(cwd.join(&args.tree))?;
    let mut pipeline = Pipeline::new(document);

    let placement = if args.after {
        DropPlacement::After
    } else {
        DropPlacement::Before
    };

    match pipeline.reorder(args.from, args.to, placement) {
        DropOutcome::Moved { plan, .. } => {
            let document = pipeline.document_mut();
            match args.out {
                Some(out) => document.save_as(cwd.join(out), config.pretty)?,
                None => document.save(config.pretty)?,
            }

            println!(
                "{} Moved block {} {} block {} (now at offset {})",
                "✓".green(),
                plan.source.index,
                match plan.placement {
                    DropPlacement::Before => "before",
                    DropPlacement::After => "after",
                },
                plan.target.index,
                plan.insert_at
            );
        }
        DropOutcome::Aborted(abort) => {
            println!("{} Nothing moved: {}", "⚠️".yellow(), abort.to_string().yellow());
        }
    }

    Ok(())
}
