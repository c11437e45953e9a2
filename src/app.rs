use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{OmError, Result};
use crate::search::{CommandRanker, ExternalRanker, Matcher, TaxonomyIndex, build_index};
use crate::taxonomy::load_taxonomy;

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;

        Ok(Self {
            project_root,
            config,
            output_format: cli.output_format(),
        })
    }

    /// Taxonomy path from the flag, falling back to config.
    pub fn taxonomy_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.config.taxonomy.path.clone())
            .map(|path| self.resolve(path))
            .ok_or_else(|| OmError::MissingConfig("taxonomy.path".to_string()))
    }

    /// Load the taxonomy and build the index. Any entry problem is fatal.
    pub fn load_index(&self, flag: Option<&Path>) -> Result<TaxonomyIndex> {
        let path = self.taxonomy_path(flag)?;
        build_index(load_taxonomy(&path)?)
    }

    /// Build a matcher, attaching the command ranker when requested.
    pub fn matcher(&self, index: TaxonomyIndex, with_ranker: bool) -> Result<Matcher> {
        let mut matcher = Matcher::new(index).with_timeout(self.config.ranker.timeout());
        if with_ranker || self.config.ranker.enabled {
            let ranker: Arc<dyn ExternalRanker> =
                Arc::new(CommandRanker::from_config(&self.config.ranker)?);
            matcher = matcher.with_ranker(ranker);
        }
        Ok(matcher)
    }

    /// Result count from the flag, falling back to config.
    #[must_use]
    pub fn top_n(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.config.matcher.default_top_n)
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.project_root.join(path)
        }
    }
}
