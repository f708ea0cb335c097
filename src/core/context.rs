//! Run context shared by the `check` and `fix` commands.
//!
//! Resolves CLI arguments against the config file and defaults, then loads
//! everything a scan needs: the glossary, the catalog list and, on request,
//! the set of already reported spans and the lines touched by a diff.
//!
//! Catalog paths are kept relative to the source root, which is how review
//! platforms and `git diff --relative` name files.

use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{
    aggregate::{ScanFilter, ScanOutcome, collect_suggestions},
    dedup::{FlaggedSpans, normalize_path},
    diff::ChangedLines,
    file_scanner::scan_files,
    glossary::GlossaryIndex,
};
use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
};

pub struct CheckContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub glossary: GlossaryIndex,
    /// Catalogs to scan relative to `root_dir`, in scan order.
    pub files: Vec<String>,
    pub verbose: bool,
}

impl CheckContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let root_dir = args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let loaded = load_config(&root_dir)?;
        if !loaded.from_file {
            debug!("no config file found, using defaults");
        }
        let config = loaded.config;

        let glossary_path = args
            .glossary
            .clone()
            .unwrap_or_else(|| root_dir.join(&config.glossary));

        let (glossary, files) = rayon::join(
            || load_glossary(&glossary_path),
            || resolve_files(args, &root_dir, &config),
        );
        let glossary = glossary?;

        debug!(
            terms = glossary.len(),
            catalogs = files.len(),
            root = %root_dir.display(),
            "context ready"
        );

        Ok(Self {
            config,
            root_dir,
            glossary,
            files,
            verbose: args.verbose,
        })
    }

    /// Load previously reported spans.
    ///
    /// `cli_path` wins over the config file; a state file that does not exist
    /// yields the empty set, one that cannot be parsed is an error.
    pub fn flagged_spans(&self, cli_path: Option<&Path>) -> Result<FlaggedSpans> {
        let path = match (cli_path, &self.config.flagged_state) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => self.root_dir.join(path),
            (None, None) => return Ok(FlaggedSpans::new()),
        };

        if !path.exists() {
            info!(path = %path.display(), "flagged state not found, nothing suppressed");
            return Ok(FlaggedSpans::new());
        }

        let spans = FlaggedSpans::load(&path)
            .with_context(|| format!("Failed to load flagged state: {}", path.display()))?;
        debug!(spans = spans.len(), "loaded flagged state");
        Ok(spans)
    }

    /// Load the lines added by a change, if a diff was given.
    pub fn changed_lines(&self, diff_path: Option<&Path>) -> Result<Option<ChangedLines>> {
        let Some(path) = diff_path else {
            return Ok(None);
        };
        let changed = ChangedLines::load(path)
            .with_context(|| format!("Failed to load diff: {}", path.display()))?;
        debug!(files = changed.file_count(), "loaded diff");
        Ok(Some(changed))
    }

    pub fn scan(&self, filter: &ScanFilter) -> ScanOutcome {
        collect_suggestions(&self.root_dir, &self.files, &self.glossary, filter)
    }

    /// Where a catalog named in a report lives on disk.
    pub fn disk_path(&self, file_path: &str) -> String {
        self.root_dir.join(file_path).to_string_lossy().into_owned()
    }
}

fn load_glossary(path: &Path) -> Result<GlossaryIndex> {
    GlossaryIndex::load(path)
        .with_context(|| format!("Failed to load glossary: {}", path.display()))
}

fn resolve_files(args: &CommonArgs, root_dir: &Path, config: &Config) -> Vec<String> {
    if !args.files.is_empty() {
        return args
            .files
            .iter()
            .map(|f| relative_to_root(root_dir, f))
            .collect();
    }

    let result = scan_files(
        &root_dir.to_string_lossy(),
        &config.includes,
        &config.ignores,
    );
    if result.skipped_count > 0 {
        debug!(skipped = result.skipped_count, "paths skipped while scanning");
    }
    result
        .files
        .iter()
        .map(|f| relative_to_root(root_dir, Path::new(f)))
        .collect()
}

/// `/`-separated path of `file` below `root`.
///
/// Relative CLI paths are taken from the working directory. A file outside
/// the root keeps its absolute path.
fn relative_to_root(root: &Path, file: &Path) -> String {
    if let Ok(relative) = file.strip_prefix(root) {
        return normalize_path(&relative.to_string_lossy());
    }

    let absolute = |p: &Path| path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    let file = absolute(file);
    match file.strip_prefix(absolute(root)) {
        Ok(relative) => normalize_path(&relative.to_string_lossy()),
        Err(_) => file.to_string_lossy().into_owned(),
    }
}
