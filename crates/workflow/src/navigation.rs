//! Pages of the app and the index menu.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

const ROUTE_BASE: &str = "tondns://app/";

/// A page of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// `/`
    Index,
    /// `/create-collection`
    CreateCollection,
    /// `/add-subdomain`
    AddSubdomain,
    /// `/manage`, optionally with `?address=` to open a resolver directly
    Manage { address: Option<String> },
}

impl Route {
    /// Parse a path with optional query. Unknown paths yield `None`.
    pub fn parse(target: &str) -> Option<Route> {
        let base = Url::parse(ROUTE_BASE).expect("route base is a valid URL");
        let url = base.join(target.trim()).ok()?;

        match url.path().trim_end_matches('/') {
            "" => Some(Route::Index),
            "/create-collection" => Some(Route::CreateCollection),
            "/add-subdomain" => Some(Route::AddSubdomain),
            "/manage" => {
                let address = url
                    .query_pairs()
                    .find(|(key, _)| key == "address")
                    .map(|(_, value)| value.trim().to_string())
                    .filter(|value| !value.is_empty());
                Some(Route::Manage { address })
            }
            _ => None,
        }
    }

    /// Like [`Route::parse`], falling back to the index.
    pub fn resolve(target: &str) -> Route {
        Self::parse(target).unwrap_or_else(|| {
            tracing::debug!(target = %target, "Unknown route, showing index");
            Route::Index
        })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::CreateCollection => "/create-collection".to_string(),
            Route::AddSubdomain => "/add-subdomain".to_string(),
            Route::Manage { address: None } => "/manage".to_string(),
            Route::Manage {
                address: Some(address),
            } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("address", address)
                    .finish();
                format!("/manage?{}", query)
            }
        }
    }

    /// Every page but the index has a back control.
    pub fn shows_back(&self) -> bool {
        !matches!(self, Route::Index)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One entry of the index menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub route: Route,
}

/// Actions listed on the index page.
pub fn index_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry {
            title: "Create collection",
            subtitle: "Create a subdomain collection",
            route: Route::CreateCollection,
        },
        MenuEntry {
            title: "Add subdomain",
            subtitle: "Add a subdomain to a collection",
            route: Route::AddSubdomain,
        },
        MenuEntry {
            title: "Manage domain",
            subtitle: "Edit the DNS records of a domain",
            route: Route::Manage { address: None },
        },
    ]
}
