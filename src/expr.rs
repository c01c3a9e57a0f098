use serde::{Deserialize, Serialize};

fn expression_type() -> String {
    "expression".to_string()
}

/// Click metadata attached to an expression, as the Desmos state format
/// expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickableInfo {
    pub enabled: bool,
    pub latex: String,
}

/// One output expression. Serializes with the field names the Desmos state
/// format uses (`type`, `latex`, `clickableInfo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expr {
    #[serde(rename = "type", default = "expression_type")]
    pub kind: String,
    pub latex: String,
    #[serde(
        rename = "clickableInfo",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub clickable_info: Option<ClickableInfo>,
}

impl Expr {
    pub fn new(latex: impl Into<String>) -> Self {
        Self {
            kind: expression_type(),
            latex: latex.into(),
            clickable_info: None,
        }
    }

    pub fn with_click(latex: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            clickable_info: Some(ClickableInfo {
                enabled: true,
                latex: info.into(),
            }),
            ..Self::new(latex)
        }
    }
}
