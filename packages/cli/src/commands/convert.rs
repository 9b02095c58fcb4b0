use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use folio_common::to_json_string;
use folio_editor::{Document, Pipeline};
use folio_model::{Page, SaveResponse};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Suffix of files written by `convert`; skipped when scanning for trees
pub const PAGE_SUFFIX: &str = ".page.json";

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Editor tree JSON file or directory (defaults to the configured source directory)
    pub path: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Write the full save response (`{ success, page: { id, title, sections, toc } }`)
    #[arg(long)]
    pub save_response: bool,

    /// Project id prefixed to page ids in save responses
    #[arg(long)]
    pub project_id: Option<String>,
}

pub fn convert(args: ConvertArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = args
        .path
        .clone()
        .map(|path| cwd.join(path))
        .unwrap_or_else(|| config.get_src_dir(cwd));

    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else if input.is_dir() {
        (input.clone(), find_tree_files(&input))
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if files.is_empty() {
        println!("{}", "⚠️  No editor tree files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Converting pages...".bright_blue().bold());
        println!("Found {} files", files.len());
    }

    let out_dir = args
        .out_dir
        .clone()
        .map(|dir| cwd.join(dir))
        .unwrap_or_else(|| config.get_out_dir(cwd));

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);
        match convert_file(file, relative_path, &args, &config, &out_dir) {
            Ok(output) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} files failed to convert", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Converted {} files successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Converted {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} files failed to convert", error_count))
    }
}

/// Every `.json` file below `dir` that is not itself a converted page
pub fn find_tree_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| is_tree_file(path))
        .collect();

    files.sort();
    files
}

fn is_tree_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    path.is_file()
        && name.ends_with(".json")
        && !name.ends_with(PAGE_SUFFIX)
        && name != crate::config::DEFAULT_CONFIG_NAME
}

fn convert_file(
    file_path: &Path,
    relative_path: &Path,
    args: &ConvertArgs,
    config: &Config,
    out_dir: &Path,
) -> Result<String> {
    let document = Document::load(file_path)?;
    debug!(file = %file_path.display(), "converting");

    let pipeline = Pipeline::new(document).with_convert_options(config.convert_options());
    let response = pipeline.save_document(args.project_id.clone());

    let output = page_json(response, args.save_response, config.pretty)?;

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = page_output_path(out_dir, relative_path);
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    fs::write(&output_file, output + "\n")
        .with_context(|| format!("writing {}", output_file.display()))?;

    Ok(output_file.display().to_string())
}

/// JSON written for one converted tree: the bare page, or the whole save response
pub fn page_json(response: SaveResponse, save_response: bool, pretty: bool) -> Result<String> {
    let json = if save_response {
        to_json_string(&response, pretty)?
    } else {
        let page = Page::new(response.page.title, response.page.sections);
        to_json_string(&page, pretty)?
    };
    Ok(json)
}

/// `dir/a/b.json` → `out/a/b.page.json`
pub fn page_output_path(out_dir: &Path, relative_path: &Path) -> PathBuf {
    let stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("page");
    let file_name = format!("{}{}", stem, PAGE_SUFFIX);

    match relative_path.parent() {
        Some(parent) => out_dir.join(parent).join(file_name),
        None => out_dir.join(file_name),
    }
}
