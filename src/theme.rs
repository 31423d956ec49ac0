use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::warn;

use crate::layout::Rgb;

pub const DEFAULT_THEME: &str = "professional";

/// Named colour bundle applied uniformly across one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub dark: Rgb,
    pub light: Rgb,
    pub features: &'static [&'static str],
}

static CATALOG: Lazy<IndexMap<&'static str, Theme>> = Lazy::new(|| {
    let themes = [
        Theme {
            id: "professional",
            name: "Professional",
            primary: Rgb(37, 99, 235),
            secondary: Rgb(30, 64, 175),
            accent: Rgb(14, 165, 233),
            dark: Rgb(17, 24, 39),
            light: Rgb(243, 244, 246),
            features: &["Executive summary", "Detailed findings", "Risk badges"],
        },
        Theme {
            id: "modern",
            name: "Modern",
            primary: Rgb(124, 58, 237),
            secondary: Rgb(91, 33, 182),
            accent: Rgb(236, 72, 153),
            dark: Rgb(30, 27, 75),
            light: Rgb(245, 243, 255),
            features: &["Gradient banner", "Score gauge", "AI insights"],
        },
        Theme {
            id: "minimal",
            name: "Minimal",
            primary: Rgb(55, 65, 81),
            secondary: Rgb(75, 85, 99),
            accent: Rgb(107, 114, 128),
            dark: Rgb(17, 24, 39),
            light: Rgb(249, 250, 251),
            features: &["Print friendly", "Compact tables"],
        },
        Theme {
            id: "corporate",
            name: "Corporate",
            primary: Rgb(15, 76, 129),
            secondary: Rgb(0, 51, 102),
            accent: Rgb(0, 150, 136),
            dark: Rgb(33, 33, 33),
            light: Rgb(240, 244, 248),
            features: &["Company branding", "Compliance ready", "Executive summary"],
        },
        Theme {
            id: "cyber",
            name: "Cyber",
            primary: Rgb(16, 185, 129),
            secondary: Rgb(4, 120, 87),
            accent: Rgb(34, 211, 238),
            dark: Rgb(15, 23, 42),
            light: Rgb(236, 253, 245),
            features: &["High contrast", "Threat focus", "AI insights"],
        },
    ];
    themes.into_iter().map(|theme| (theme.id, theme)).collect()
});

/// Look up a theme by template id. Unknown or absent ids fall back to the default theme.
pub fn resolve_theme(template_id: Option<&str>) -> &'static Theme {
    let requested = template_id.map(|id| id.trim().to_lowercase());
    match requested.as_deref() {
        None | Some("") => default_theme(),
        Some(id) => CATALOG.get(id).unwrap_or_else(|| {
            warn!("Unknown template '{}', using '{}'", id, DEFAULT_THEME);
            default_theme()
        }),
    }
}

pub fn default_theme() -> &'static Theme {
    &CATALOG[DEFAULT_THEME]
}

/// All themes in catalog order.
pub fn themes() -> impl Iterator<Item = &'static Theme> {
    CATALOG.values()
}
