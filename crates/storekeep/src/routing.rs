use thiserror::Error;

/// Message of the envelope returned when no handler matches an event.
pub const UNKNOWN_ROUTE_MESSAGE: &str = "No handler for route";

/// An event that no handler serves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("No handler for {method} {path}")]
pub struct UnknownRoute {
    pub method: String,
    pub path: String,
}

impl UnknownRoute {
    pub fn new(method_and_path: Option<(String, String)>) -> Self {
        let (method, path) =
            method_and_path.unwrap_or_else(|| ("<none>".to_string(), "<none>".to_string()));
        Self { method, path }
    }
}

/// The five store handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Route {
    GetStore,
    CreateStore,
    UpdateStore,
    DeleteStore,
    GetAllStores,
}

impl Route {
    /// Handler name as deployed.
    pub fn name(self) -> &'static str {
        match self {
            Route::GetStore => "getStore",
            Route::CreateStore => "createStore",
            Route::UpdateStore => "updateStore",
            Route::DeleteStore => "deleteStore",
            Route::GetAllStores => "getAllStores",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Route::GetStore => "Successfully retrieved store",
            Route::CreateStore => "Successfully created store",
            Route::UpdateStore => "Successfully updated store",
            Route::DeleteStore => "Successfully deleted store",
            Route::GetAllStores => "Successfully retrieved all stores",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Route::GetStore => "Failed to get store",
            Route::CreateStore => "Failed to create store",
            Route::UpdateStore => "Failed to update store",
            Route::DeleteStore => "Failed to delete store",
            Route::GetAllStores => "Failed to retrieve stores",
        }
    }

    /// Resolves the handler for a method and path.
    ///
    /// - `GET /stores` -> getAllStores
    /// - `GET /store/{storeId}` -> getStore
    /// - `POST /store` -> createStore
    /// - `PUT /store/{storeId}` -> updateStore
    /// - `DELETE /store/{storeId}` -> deleteStore
    pub fn resolve(method: &str, path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match (method, segments.as_slice()) {
            ("GET", ["stores"]) => Some(Route::GetAllStores),
            ("GET", ["store", _]) => Some(Route::GetStore),
            ("POST", ["store"]) => Some(Route::CreateStore),
            ("PUT", ["store", _]) => Some(Route::UpdateStore),
            ("DELETE", ["store", _]) => Some(Route::DeleteStore),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_routes_by_resource_template() {
        let cases = [
            ("GET", "/stores", Route::GetAllStores),
            ("GET", "/store/{storeId}", Route::GetStore),
            ("POST", "/store", Route::CreateStore),
            ("PUT", "/store/{storeId}", Route::UpdateStore),
            ("DELETE", "/store/{storeId}", Route::DeleteStore),
        ];

        for (method, resource, expected) in cases {
            assert_eq!(
                Route::resolve(method, resource),
                Some(expected),
                "{method} {resource}"
            );
        }
    }

    #[test]
    fn test_routes_by_concrete_path() {
        assert_eq!(Route::resolve("GET", "/store/s1/"), Some(Route::GetStore));
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Route::resolve("PATCH", "/store/{storeId}"), None);
        assert_eq!(Route::resolve("GET", "/store"), None);
        assert_eq!(Route::resolve("GET", ""), None);
    }

    #[test]
    fn test_unknown_route_names_method_and_path() {
        let error = UnknownRoute::new(Some(("PATCH".to_string(), "/store/{storeId}".to_string())));
        assert_eq!(error.to_string(), "No handler for PATCH /store/{storeId}");

        let error = UnknownRoute::new(None);
        assert_eq!(error.to_string(), "No handler for <none> <none>");
    }

    #[test]
    fn test_cli_names_are_kebab_case() {
        let route = Route::from_str("get-all-stores", true).unwrap();
        assert_eq!(route, Route::GetAllStores);
        assert_eq!(route.name(), "getAllStores");
    }
}
