//! Recursive expansion of `## include('...') ##` directives

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::metrics::IncludeMetrics;

use super::resolver::ViewResolver;
use super::scanner::include_directives;
use super::types::{ViewError, ViewResult};

/// Expands partial inclusions in place.
///
/// A directive whose partial does not exist is left in the text unchanged.
/// Expansion fails with [`ViewError::InclusionCycle`] when a partial includes
/// itself, directly or through other partials, and with
/// [`ViewError::MaxDepthExceeded`] when nesting goes deeper than `max_depth`.
pub struct IncludeExpander<'r> {
    resolver: &'r ViewResolver,
    max_depth: usize,
}

impl<'r> IncludeExpander<'r> {
    pub fn new(resolver: &'r ViewResolver, max_depth: usize) -> Self {
        Self {
            resolver,
            max_depth,
        }
    }

    /// Expand the view at `path`; `None` when the file does not exist
    pub fn expand(&self, path: &Path) -> ViewResult<Option<String>> {
        let mut chain = Vec::new();
        self.expand_in_chain(path, &mut chain)
    }

    fn expand_in_chain(&self, path: &Path, chain: &mut Vec<PathBuf>) -> ViewResult<Option<String>> {
        let Some(raw) = read_view(path)? else {
            return Ok(None);
        };

        let directives = include_directives(&raw);
        if directives.is_empty() {
            return Ok(Some(raw));
        }

        chain.push(path.to_path_buf());

        let mut compiled = raw.clone();
        let mut expanded = HashSet::new();

        for directive in &directives {
            // Identical directives were already replaced in one step
            if !expanded.insert(directive.raw) {
                continue;
            }

            let partial_path = self.resolver.resolve(directive.target);
            if !partial_path.is_file() {
                IncludeMetrics::record_missing();
                tracing::debug!(
                    partial = %directive.target,
                    path = %partial_path.display(),
                    "Partial not found, leaving include directive in place"
                );
                continue;
            }

            if chain.contains(&partial_path) {
                let mut cycle = chain.clone();
                cycle.push(partial_path);
                tracing::warn!(partial = %directive.target, "Inclusion cycle detected");
                return Err(ViewError::InclusionCycle { chain: cycle });
            }

            if chain.len() > self.max_depth {
                tracing::warn!(
                    partial = %directive.target,
                    limit = self.max_depth,
                    "Maximum include depth exceeded"
                );
                return Err(ViewError::MaxDepthExceeded {
                    target: directive.target.to_string(),
                    limit: self.max_depth,
                });
            }

            // The partial may vanish between the existence check and the read
            if let Some(partial) = self.expand_in_chain(&partial_path, chain)? {
                compiled = compiled.replace(directive.raw, &partial);
                IncludeMetrics::record_included();
            }
        }

        chain.pop();
        Ok(Some(compiled))
    }
}

fn read_view(path: &Path) -> ViewResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ViewError::io(path, e)),
    }
}
