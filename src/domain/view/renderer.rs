//! Render orchestration: resolve, expand, substitute

use uuid::Uuid;

use crate::config::{MessagesConfig, Settings};
use crate::metrics::RenderMetrics;

use super::expander::IncludeExpander;
use super::resolver::ViewResolver;
use super::substitution::substitute;
use super::types::{Bindings, ViewError, ViewResult};

/// Public entry point for compiling views.
///
/// Holds only immutable configuration. Every call re-reads the view and all of
/// its partials from disk; nothing is cached between renders.
#[derive(Debug, Clone)]
pub struct ViewRenderer {
    resolver: ViewResolver,
    max_include_depth: usize,
    messages: MessagesConfig,
}

impl ViewRenderer {
    pub fn new(resolver: ViewResolver, max_include_depth: usize, messages: MessagesConfig) -> Self {
        Self {
            resolver,
            max_include_depth,
            messages,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ViewResolver::from_config(&settings.views),
            settings.views.max_include_depth,
            settings.messages.clone(),
        )
    }

    pub fn resolver(&self) -> &ViewResolver {
        &self.resolver
    }

    /// Render the view `name` with `bindings`.
    ///
    /// Fails with [`ViewError::NotFound`] when the view file does not exist.
    pub fn render(&self, name: &str, bindings: &Bindings) -> ViewResult<String> {
        let render_id = Uuid::new_v4();
        let span = tracing::info_span!("view.render", view = %name, render_id = %render_id);
        let _enter = span.enter();

        let timer = RenderMetrics::start_timer();
        let result = self.compile(name, bindings);
        timer.observe_duration();

        match &result {
            Ok(output) => {
                RenderMetrics::record_ok();
                tracing::debug!(bytes = output.len(), "View rendered");
            }
            Err(ViewError::NotFound { .. }) => RenderMetrics::record_not_found(),
            Err(_) => RenderMetrics::record_error(),
        }

        result
    }

    fn compile(&self, name: &str, bindings: &Bindings) -> ViewResult<String> {
        let path = self.resolver.resolve(name);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "View file not found");
            return Err(self.not_found(name));
        }

        let expanded = IncludeExpander::new(&self.resolver, self.max_include_depth)
            .expand(&path)?
            .ok_or_else(|| self.not_found(name))?;

        Ok(substitute(&expanded, bindings))
    }

    fn not_found(&self, name: &str) -> ViewError {
        ViewError::NotFound {
            name: name.to_string(),
            message: self.messages.view_not_found_message.clone(),
            code: self.messages.view_not_found_code,
        }
    }
}
