//! Route registry integration tests
//!
//! The registry is configured from the same settings as the renderer, so the
//! duplicate-route message and code come from `messages.*`.

use ara_view_renderer::config::Settings;
use ara_view_renderer::error::AppError;
use ara_view_renderer::routing::{HttpMethod, RouteError, RouteRegistry};

fn registry() -> RouteRegistry {
    let mut settings = Settings::default();
    settings.messages.route_already_exists_message = "Route taken".to_string();
    settings.messages.route_already_exists_code = 3;
    RouteRegistry::new(settings.messages)
}

#[test]
fn test_application_routes() {
    let routes = registry();

    routes
        .register_get("/", "HomeController@index", Some("home"))
        .unwrap();
    routes
        .register_get("/posts/{id}", "PostController@show", Some("posts.show"))
        .unwrap();
    routes
        .register_post("/posts/{id}", "PostController@update", None)
        .unwrap();

    assert_eq!(routes.len(), 3);
    assert_eq!(routes.uri_for("posts.show").as_deref(), Some("/posts/{id}"));

    let methods: Vec<HttpMethod> = routes.routes().iter().map(|r| r.method).collect();
    assert_eq!(
        methods.iter().filter(|m| **m == HttpMethod::Post).count(),
        1
    );
}

#[test]
fn test_duplicate_route_maps_to_app_error() {
    let routes = registry();
    routes.register_get("/posts/{id}", "PostController@show", None).unwrap();

    let err = routes
        .register_get("/posts/{slug}", "PostController@bySlug", None)
        .unwrap_err();
    assert_eq!(err.code(), Some(3));
    assert!(err.to_string().starts_with("Route taken"));

    let app: AppError = err.into();
    assert_eq!(app.code(), "ROUTE_EXISTS");
}

#[test]
fn test_invalid_handler_maps_to_app_error() {
    let routes = registry();
    let err = routes.register_post("/login", "login", None).unwrap_err();
    assert!(matches!(err, RouteError::InvalidHandler(_)));
    assert_eq!(AppError::from(err).code(), "INVALID_HANDLER");
}
