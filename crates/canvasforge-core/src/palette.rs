//! Built-in color palettes.

use serde::Serialize;

/// Name of the palette used when a lookup misses.
pub const DEFAULT_PALETTE: &str = "vibrant";

/// A named, ordered list of hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl Palette {
    /// Color at `index`, wrapping around the palette.
    pub fn cycle(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }
}

static PALETTES: &[Palette] = &[
    Palette {
        name: "vibrant",
        colors: &["#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899"],
    },
    Palette {
        name: "pastel",
        colors: &["#fecaca", "#fde68a", "#bbf7d0", "#bfdbfe", "#ddd6fe", "#fbcfe8"],
    },
    Palette {
        name: "dark",
        colors: &["#1f2937", "#374151", "#4b5563", "#111827", "#312e81", "#7f1d1d"],
    },
    Palette {
        name: "earth",
        colors: &["#78350f", "#92400e", "#a16207", "#4d7c0f", "#365314", "#57534e"],
    },
    Palette {
        name: "ocean",
        colors: &["#0c4a6e", "#0369a1", "#0891b2", "#06b6d4", "#67e8f9", "#134e4a"],
    },
    Palette {
        name: "sunset",
        colors: &["#7c2d12", "#c2410c", "#f97316", "#fb923c", "#f43f5e", "#be185d"],
    },
];

/// Exact-name lookup.
pub fn get(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.name == name)
}

/// Lookup that falls back to [`DEFAULT_PALETTE`] for unknown names.
pub fn resolve(name: &str) -> &'static Palette {
    match get(name) {
        Some(p) => p,
        None => {
            log::warn!("Unknown palette '{}', falling back to '{}'", name, DEFAULT_PALETTE);
            default_palette()
        }
    }
}

pub fn default_palette() -> &'static Palette {
    &PALETTES[0]
}

/// All registered palettes in registration order.
pub fn all() -> &'static [Palette] {
    PALETTES
}

/// Fixed six-color cycle used by chart synthesis.
pub fn chart_colors() -> &'static Palette {
    default_palette()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        let names: Vec<&str> = all().iter().map(|p| p.name).collect();
        assert_eq!(names, ["vibrant", "pastel", "dark", "earth", "ocean", "sunset"]);
    }

    #[test]
    fn test_unknown_falls_back_to_vibrant() {
        assert!(get("neon").is_none());
        assert_eq!(resolve("neon").name, "vibrant");
        assert_eq!(resolve("ocean").name, "ocean");
    }

    #[test]
    fn test_cycle_wraps() {
        let p = chart_colors();
        assert_eq!(p.colors.len(), 6);
        assert_eq!(p.cycle(6), p.cycle(0));
        assert_eq!(p.cycle(7), p.colors[1]);
    }

    #[test]
    fn test_colors_are_hex() {
        for p in all() {
            for c in p.colors {
                assert_eq!(c.len(), 7);
                assert!(c.starts_with('#'));
                assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
            }
        }
    }
}
