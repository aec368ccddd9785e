use serde::{Deserialize, Serialize};

use crate::layout::LayoutMode;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutQuery {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub mode: LayoutMode,
    pub wrapper: bool,
    pub header: bool,
    pub footer: bool,
}

impl From<LayoutMode> for LayoutResponse {
    fn from(mode: LayoutMode) -> Self {
        let decoration = mode.decoration();
        Self {
            mode,
            wrapper: decoration.wrapper,
            header: decoration.header,
            footer: decoration.footer,
        }
    }
}
