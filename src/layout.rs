//! Route-based page decoration for the UI shell.
//!
//! Admin and dashboard screens bring their own chrome, so they render bare.
//! Authentication screens keep the standard wrapper but drop the header and
//! footer. Everything else gets the full layout.

use serde::{Deserialize, Serialize};

const BARE_PREFIXES: [&str; 2] = ["/admin", "/dashboard"];
const AUTH_PREFIX: &str = "/auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Bare,
    Auth,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub wrapper: bool,
    pub header: bool,
    pub footer: bool,
}

impl LayoutMode {
    pub fn decoration(self) -> Decoration {
        match self {
            LayoutMode::Bare => Decoration { wrapper: false, header: false, footer: false },
            LayoutMode::Auth => Decoration { wrapper: true, header: false, footer: false },
            LayoutMode::Full => Decoration { wrapper: true, header: true, footer: true },
        }
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn classify(path: &str) -> LayoutMode {
    let path = path.split(['?', '#']).next().unwrap_or_default();

    if BARE_PREFIXES.iter().any(|prefix| is_under(path, prefix)) {
        LayoutMode::Bare
    } else if is_under(path, AUTH_PREFIX) {
        LayoutMode::Auth
    } else {
        LayoutMode::Full
    }
}
