// Client preferences persisted in browser cookies
use serde::Serialize;

pub const THEME_COOKIE: &str = "weatherdan_theme";
pub const MAX_ENTRIES_COOKIE: &str = "weatherdan_max-entries";

const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Theme selected by toggling away from `current`
    pub fn toggled(current: Option<Theme>) -> Theme {
        match current {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// `Set-Cookie` value storing this theme for thirty days
    pub fn cookie(&self) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Strict",
            THEME_COOKIE,
            self.as_str(),
            COOKIE_MAX_AGE_SECS
        )
    }

    fn parse(value: &str) -> Option<Theme> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Option<Theme>,
    pub max_entries: Option<usize>,
}

impl Preferences {
    /// Read preferences from the value of a `Cookie` request header
    pub fn from_cookie_header(header: &str) -> Self {
        let mut preferences = Self::default();

        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value.trim())
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.trim().to_string());

            match name.trim() {
                THEME_COOKIE => preferences.theme = Theme::parse(&value),
                MAX_ENTRIES_COOKIE => preferences.max_entries = parse_max_entries(&value),
                _ => {}
            }
        }

        preferences
    }
}

/// `all`, `0` and anything non-numeric mean no cap
pub fn parse_max_entries(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_header() {
        let prefs = Preferences::from_cookie_header(
            "session=abc; weatherdan_theme=dark; weatherdan_max-entries=28",
        );
        assert_eq!(prefs.theme, Some(Theme::Dark));
        assert_eq!(prefs.max_entries, Some(28));
    }

    #[test]
    fn test_unset_values() {
        let prefs = Preferences::from_cookie_header("weatherdan_theme=blue; weatherdan_max-entries=all");
        assert_eq!(prefs, Preferences::default());

        assert_eq!(parse_max_entries("0"), None);
        assert_eq!(parse_max_entries(" 7 "), Some(7));
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::toggled(Some(Theme::Dark)), Theme::Light);
        assert_eq!(Theme::toggled(Some(Theme::Light)), Theme::Dark);
        assert_eq!(Theme::toggled(None), Theme::Dark);
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(
            Theme::Light.cookie(),
            "weatherdan_theme=light; Path=/; Max-Age=2592000; SameSite=Strict"
        );
    }
}
