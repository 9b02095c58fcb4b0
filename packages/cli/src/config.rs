use anyhow::Context;
use folio_compiler_html::{CompileOptions, FragmentPolicy};
use folio_compiler_sections::ConvertOptions;
use folio_model::DEFAULT_PAGE_TITLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding editor tree JSON files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where converted pages are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Which stored fragments `render` keeps
    #[serde(default)]
    pub fragment_policy: FragmentPolicy,

    /// Page title for documents without a level-1 heading
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

fn default_src_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_title() -> String {
    DEFAULT_PAGE_TITLE.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            default_title: self.default_title.clone(),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            fragment_policy: self.fragment_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            fragment_policy: FragmentPolicy::default(),
            default_title: default_title(),
            pretty: false,
        }
    }
}
