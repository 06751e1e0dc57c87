//! End-to-end rendering tests
//!
//! These tests build small view trees on disk and render them through the
//! public API, the same way the command line front end does.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use ara_view_renderer::config::{MessagesConfig, Settings};
use ara_view_renderer::error::AppError;
use ara_view_renderer::view::{Bindings, IncludeExpander, ViewError, ViewRenderer, ViewResolver};

/// A temporary views root with helpers for writing view files
struct ViewTree {
    dir: TempDir,
}

impl ViewTree {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a view addressed by its dotted identifier
    fn view(&self, name: &str, content: &str) -> &Self {
        let path = ViewResolver::new(self.root(), "html").resolve(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn renderer(&self) -> ViewRenderer {
        let mut settings = Settings::default();
        settings.views.path = self.root().to_path_buf();
        ViewRenderer::from_settings(&settings)
    }
}

#[test]
fn test_full_page_render() {
    let tree = ViewTree::new();
    tree.view(
        "layout.main",
        "<html>## include('layout.head') ##<body>## include('pages.home') ##</body></html>",
    )
    .view("layout.head", "<title>## @title|Untitled ##</title>")
    .view(
        "pages.home",
        "<h1>Hi ## e@user|guest ##</h1>## include('widgets.footer') ##",
    )
    .view("widgets.footer", "<footer>## @year ##</footer>");

    let bindings = Bindings::from_json(json!({
        "user": "<script>",
        "year": 2024
    }))
    .unwrap();

    let output = tree.renderer().render("layout.main", &bindings).unwrap();
    assert_eq!(
        output,
        "<html><title>Untitled</title><body><h1>Hi &lt;script&gt;</h1>\
         <footer>2024</footer></body></html>"
    );
}

#[test]
fn test_recursive_inclusion_two_levels() {
    let tree = ViewTree::new();
    tree.view("root", "R[## include('partial') ##]")
        .view("partial", "P[## include('leaf') ##]")
        .view("leaf", "L");

    let output = tree.renderer().render("root", &Bindings::new()).unwrap();
    assert_eq!(output, "R[P[L]]");
}

#[test]
fn test_missing_partial_survives_render() {
    let tree = ViewTree::new();
    tree.view("root", "before ## include('partial') ## after ## @x|y ##");

    let output = tree.renderer().render("root", &Bindings::new()).unwrap();
    assert_eq!(output, "before ## include('partial') ## after y");
}

#[test]
fn test_not_found_root() {
    let tree = ViewTree::new();
    let err = tree
        .renderer()
        .render("doesnotexist", &Bindings::new())
        .unwrap_err();

    assert!(matches!(err, ViewError::NotFound { .. }));
    assert_eq!(AppError::from(err).code(), "VIEW_NOT_FOUND");
}

#[test]
fn test_configured_not_found_message() {
    let tree = ViewTree::new();
    let renderer = ViewRenderer::new(
        ViewResolver::new(tree.root(), "html"),
        4,
        MessagesConfig {
            view_not_found_message: "Missing template".to_string(),
            view_not_found_code: 12,
            ..MessagesConfig::default()
        },
    );

    let err = renderer.render("nowhere", &Bindings::new()).unwrap_err();
    assert_eq!(err.to_string(), "Missing template: nowhere");
    assert_eq!(err.code(), Some(12));
}

#[test]
fn test_partial_variables_bound_from_caller() {
    let tree = ViewTree::new();
    tree.view("email", "## include('email.header') ##Body for ## @name ##")
        .view("email.header", "Dear ## @name|customer ##,\n");

    let bindings = Bindings::new().with("name", "Ada");
    let output = tree.renderer().render("email", &bindings).unwrap();
    assert_eq!(output, "Dear Ada,\nBody for Ada");
}

#[test]
fn test_unescaped_value_injects_markup() {
    let tree = ViewTree::new();
    tree.view("raw", "<div>## @html ##</div>");

    let bindings = Bindings::new().with("html", "<em>trusted</em>");
    let output = tree.renderer().render("raw", &bindings).unwrap();
    assert_eq!(output, "<div><em>trusted</em></div>");
}

#[test]
fn test_cycle_is_reported() {
    let tree = ViewTree::new();
    tree.view("a", "## include('b') ##").view("b", "## include('a') ##");

    let err = tree.renderer().render("a", &Bindings::new()).unwrap_err();
    assert!(matches!(err, ViewError::InclusionCycle { .. }));
    assert_eq!(AppError::from(err).code(), "INCLUSION_CYCLE");
}

#[test]
fn test_expander_usable_directly() {
    let tree = ViewTree::new();
    tree.view("shell", "<## include('inner') ##>").view("inner", "## @x ##");

    let resolver = ViewResolver::new(tree.root(), "html");
    let expanded = IncludeExpander::new(&resolver, 4)
        .expand(&resolver.resolve("shell"))
        .unwrap()
        .unwrap();

    // Variables are untouched until substitution
    assert_eq!(expanded, "<## @x ##>");
}

#[test]
fn test_custom_extension() {
    let tree = ViewTree::new();
    fs::write(tree.root().join("note.txt"), "plain ## @v ##").unwrap();

    let renderer = ViewRenderer::new(
        ViewResolver::new(tree.root(), "txt"),
        4,
        MessagesConfig::default(),
    );
    let output = renderer
        .render("note", &Bindings::new().with("v", true))
        .unwrap();
    assert_eq!(output, "plain true");
}

#[test]
fn test_rooted_include_resolves_inside_views_root() {
    let tree = ViewTree::new();
    tree.view("page", "[## include('/shared/note') ##]")
        .view("shared.note", "inside");

    let output = tree.renderer().render("page", &Bindings::new()).unwrap();
    assert_eq!(output, "[inside]");
}
