use palette::Srgb;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::warn;

use crate::config::ColorConfig;
use crate::scene::paint::Typeface;

/// Named colors and the text typeface, looked up once when styles are built.
pub trait Resources {
    /// Resolve a style role ("axis", "label", "circle", "vector", "marker").
    fn color(&self, role: &str) -> Option<Srgb<u8>>;
    fn typeface(&self) -> Typeface;
}

/// Built-in palette: white strokes, yellow dashes, pink accent.
pub const BUILTIN_COLORS: &[(&str, &str)] = &[
    ("white", "#FFFFFF"),
    ("yellow", "#FFEB3B"),
    ("accent", "#FF4081"),
];

/// Default role to color-name assignment.
pub const BUILTIN_ROLES: &[(&str, &str)] = &[
    ("axis", "white"),
    ("label", "white"),
    ("circle", "yellow"),
    ("vector", "accent"),
    ("marker", "white"),
];

/// Parse "#RRGGBB" or "RRGGBB".
pub fn parse_hex(hex: &str) -> Option<Srgb<u8>> {
    let trimmed = hex.trim();
    let normalized = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{}", trimmed)
    };
    if normalized.len() != 7 {
        return None;
    }
    Srgb::<u8>::from_str(&normalized).ok()
}

pub struct BuiltinResources;

impl Resources for BuiltinResources {
    fn color(&self, role: &str) -> Option<Srgb<u8>> {
        let name = lookup(BUILTIN_ROLES, role)?;
        parse_hex(lookup(BUILTIN_COLORS, name)?)
    }

    fn typeface(&self) -> Typeface {
        Typeface::Bold
    }
}

fn lookup<'a>(table: &'a [(&str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Resources backed by the `[colors]` config table.
///
/// Roles map to color names, names map to hex values. Names missing from the
/// config fall back to the built-in palette; roles missing from both fall
/// back to the built-in role assignment.
pub struct ConfigResources {
    roles: HashMap<String, Srgb<u8>>,
    typeface: Typeface,
}

impl ConfigResources {
    pub fn new(config: &ColorConfig) -> Self {
        let mut roles = HashMap::new();
        for &(role, default_name) in BUILTIN_ROLES {
            let name = config.role(role).unwrap_or(default_name);
            match resolve_name(config, name) {
                Some(color) => {
                    roles.insert(role.to_string(), color);
                }
                None => {
                    warn!("Unknown color '{}' for {}, using {}", name, role, default_name);
                    // A broken `[colors.named]` entry can shadow the default name too
                    if let Some(color) = resolve_name(config, default_name)
                        .or_else(|| BuiltinResources.color(role))
                    {
                        roles.insert(role.to_string(), color);
                    }
                }
            }
        }

        let typeface = if config.bold_text {
            Typeface::Bold
        } else {
            Typeface::Default
        };

        Self { roles, typeface }
    }
}

/// A color reference is either a palette name or a literal hex value.
fn resolve_name(config: &ColorConfig, name: &str) -> Option<Srgb<u8>> {
    if let Some(hex) = config.named.get(name) {
        return parse_hex(hex);
    }
    if let Some(hex) = lookup(BUILTIN_COLORS, name) {
        return parse_hex(hex);
    }
    parse_hex(name)
}

impl Resources for ConfigResources {
    fn color(&self, role: &str) -> Option<Srgb<u8>> {
        self.roles.get(role).copied()
    }

    fn typeface(&self) -> Typeface {
        self.typeface
    }
}
