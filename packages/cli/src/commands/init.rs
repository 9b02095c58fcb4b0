use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_common::write_json;
use folio_compiler_html::FragmentPolicy;
use serde_json::json;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory holding editor tree JSON files
    #[arg(short, long, default_value = "pages")]
    pub src_dir: String,

    /// Drop spacer paragraphs when rendering pages
    #[arg(long)]
    pub drop_empty: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio project...".bright_blue().bold());

    // Create source directory if it doesn't exist
    let src_dir = cwd.join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    // Create example editor tree
    let example_file = src_dir.join("welcome.json");
    if !example_file.exists() {
        let example = json!({
            "type": "doc",
            "content": [
                { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Welcome" }] },
                { "type": "paragraph", "content": [{ "type": "text", "text": "This page was created by folio init." }] },
                { "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Getting started" }] },
                { "type": "paragraph", "content": [
                    { "type": "text", "text": "Run " },
                    { "type": "text", "text": "folio convert", "marks": [{ "type": "code" }] },
                    { "type": "text", "text": " to build the page." }
                ] }
            ]
        });
        write_json(&example_file, &example, true)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        fragment_policy: if args.drop_empty {
            FragmentPolicy::DropEmpty
        } else {
            FragmentPolicy::PreserveSpacers
        },
        pretty: true,
        ..Config::default()
    };

    // Write config file
    write_json(&config_path, &config, true)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.src_dir);
    println!("  2. Run: folio convert");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
