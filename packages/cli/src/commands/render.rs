use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_common::read_json;
use folio_compiler_html::{compile_page_to_html, FragmentPolicy};
use folio_model::Page;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Stored page JSON (a page, or a save response holding one)
    pub page: PathBuf,

    /// Drop fragments without visible text
    #[arg(long)]
    pub drop_empty: bool,

    /// Write HTML to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let page = load_page(&cwd.join(&args.page))?;

    let mut options = config.compile_options();
    if args.drop_empty {
        options.fragment_policy = FragmentPolicy::DropEmpty;
    }

    let html = compile_page_to_html(&page, options);

    match args.out {
        Some(out) => {
            let out = cwd.join(out);
            fs::write(&out, &html).with_context(|| format!("writing {}", out.display()))?;
            println!(
                "{} {} → {}",
                "✓".green(),
                args.page.display(),
                out.display()
            );
        }
        None => println!("{}", html),
    }

    Ok(())
}

/// Read a page from disk, unwrapping `{ "page": ... }` save responses
pub fn load_page(path: &Path) -> Result<Page> {
    let mut value: Value =
        read_json(path).with_context(|| format!("loading page {}", path.display()))?;

    if let Some(page) = value.get_mut("page") {
        value = page.take();
    }

    serde_json::from_value(value).with_context(|| format!("{} is not a page", path.display()))
}
