//! Light/dark chart palettes
//!
//! The theme is plain configuration: resolve it once at startup and pass it
//! into each widget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host page theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Color tokens used by the chart options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub fg: &'static str,
    pub bg: &'static str,
    pub split_line: &'static str,
    pub bar: &'static str,
    pub line: &'static str,
}

const LIGHT: ThemePalette = ThemePalette {
    fg: "#24292F",
    bg: "#ffffff",
    split_line: "#D0D7DE",
    bar: "#ED3E4A",
    line: "#F02331",
};

const DARK: ThemePalette = ThemePalette {
    fg: "#c9d1d9",
    bg: "#0d1118",
    split_line: "#30363D",
    bar: "#ED3E4A",
    line: "#FF8088",
};

impl Theme {
    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" | "dark_dimmed" | "dark_high_contrast" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_where_expected() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.bar, dark.bar);
        assert_ne!(light.fg, dark.fg);
        assert_eq!(dark.bg, "#0d1118");
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("dark_dimmed".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
