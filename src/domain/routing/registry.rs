//! Route registry with uniqueness checks

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::config::MessagesConfig;

use super::types::{HttpMethod, Route, RouteError, RouteResult};

/// Registry of application routes.
///
/// Owned by the application bootstrap and passed around by reference. Routes
/// are grouped by URI so the uniqueness check only inspects candidates that
/// can clash.
pub struct RouteRegistry {
    /// uri -> (sequence, route) pairs registered under it
    routes: DashMap<String, Vec<(u64, Route)>>,
    /// route name -> pattern
    names: DashMap<String, String>,
    /// Next registration sequence number
    sequence: AtomicU64,
    messages: MessagesConfig,
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new(MessagesConfig::default())
    }
}

impl RouteRegistry {
    pub fn new(messages: MessagesConfig) -> Self {
        Self {
            routes: DashMap::new(),
            names: DashMap::new(),
            sequence: AtomicU64::new(0),
            messages,
        }
    }

    /// Register a GET route
    pub fn register_get(
        &self,
        pattern: &str,
        handler: &str,
        name: Option<&str>,
    ) -> RouteResult<Route> {
        self.register(Route::new(HttpMethod::Get, pattern, handler, name)?)
    }

    /// Register a POST route
    pub fn register_post(
        &self,
        pattern: &str,
        handler: &str,
        name: Option<&str>,
    ) -> RouteResult<Route> {
        self.register(Route::new(HttpMethod::Post, pattern, handler, name)?)
    }

    fn register(&self, route: Route) -> RouteResult<Route> {
        // The entry guard keeps the check and the insert atomic per URI
        let mut bucket = self.routes.entry(route.uri.clone()).or_default();

        if bucket
            .iter()
            .any(|(_, existing)| existing.conflicts_with(&route))
        {
            tracing::warn!(
                method = %route.method,
                pattern = %route.pattern,
                "Route already registered"
            );
            return Err(RouteError::AlreadyExists {
                method: route.method,
                pattern: route.pattern,
                message: self.messages.route_already_exists_message.clone(),
                code: self.messages.route_already_exists_code,
            });
        }

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        bucket.push((seq, route.clone()));
        drop(bucket);

        if let Some(name) = &route.name {
            self.names.insert(name.clone(), route.pattern.clone());
        }

        tracing::debug!(
            method = %route.method,
            pattern = %route.pattern,
            handler = %route.handler,
            "Route registered"
        );

        Ok(route)
    }

    /// Pattern of the route registered under `name`
    pub fn uri_for(&self, name: &str) -> Option<String> {
        self.names.get(name).map(|pattern| pattern.clone())
    }

    /// All registered routes, in registration order
    pub fn routes(&self) -> Vec<Route> {
        let mut routes: Vec<(u64, Route)> = self
            .routes
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        routes.sort_by_key(|(seq, _)| *seq);
        routes.into_iter().map(|(_, route)| route).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_list() {
        let registry = RouteRegistry::default();
        registry
            .register_get("/", "HomeController@index", Some("home"))
            .unwrap();
        registry
            .register_post("/users", "UserController@store", None)
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.routes().len(), 2);
    }

    #[test]
    fn test_duplicate_get_rejected() {
        let registry = RouteRegistry::new(MessagesConfig {
            route_already_exists_message: "Duplicate route".to_string(),
            route_already_exists_code: 7,
            ..MessagesConfig::default()
        });

        registry
            .register_get("/users/{id}", "UserController@show", None)
            .unwrap();

        match registry.register_get("/users/{name}", "UserController@byName", None) {
            Err(err @ RouteError::AlreadyExists { .. }) => {
                assert_eq!(err.code(), Some(7));
                assert_eq!(err.to_string(), "Duplicate route: GET /users/{name}");
            }
            other => panic!("expected duplicate error, got {:?}", other),
        }

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_with_different_param_count_allowed() {
        let registry = RouteRegistry::default();
        registry.register_get("/users", "A@index", None).unwrap();
        registry.register_get("/users/{id}", "A@show", None).unwrap();
        registry.register_get("/users/{id}/{tab}", "A@tab", None).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_post_with_different_params_allowed() {
        let registry = RouteRegistry::default();
        registry.register_post("/users/{id}", "A@update", None).unwrap();
        registry.register_post("/users/{slug}", "A@rename", None).unwrap();

        assert!(matches!(
            registry.register_post("/users/{id}", "A@again", None),
            Err(RouteError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_same_uri_different_method_allowed() {
        let registry = RouteRegistry::default();
        registry.register_get("/login", "Auth@form", None).unwrap();
        registry.register_post("/login", "Auth@login", None).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_uri_for() {
        let registry = RouteRegistry::default();
        registry
            .register_get("/posts/{id}", "PostController@show", Some("posts.show"))
            .unwrap();

        assert_eq!(registry.uri_for("posts.show").as_deref(), Some("/posts/{id}"));
        assert!(registry.uri_for("unknown").is_none());
    }

    #[test]
    fn test_routes_keep_registration_order() {
        let registry = RouteRegistry::default();
        let patterns: Vec<String> = (0..50).map(|i| format!("/page{}", i)).collect();
        for pattern in &patterns {
            registry.register_get(pattern, "PageController@show", None).unwrap();
        }
        registry.register_post("/page0", "PageController@store", None).unwrap();

        let listed: Vec<(HttpMethod, String)> = registry
            .routes()
            .into_iter()
            .map(|route| (route.method, route.pattern))
            .collect();

        let mut expected: Vec<(HttpMethod, String)> = patterns
            .iter()
            .map(|pattern| (HttpMethod::Get, pattern.clone()))
            .collect();
        expected.push((HttpMethod::Post, "/page0".to_string()));

        assert_eq!(listed, expected);
    }
}
