//! The injectable application context.
//!
//! Cross-cutting UI preferences — theme mode and locale — live in an
//! explicitly constructed [`AppContext`] rather than in module-level
//! singletons. The context is built with [`AppContextBuilder`], restored
//! from its [`Storage`] with [`init`](AppContext::init), consulted and
//! mutated through its methods, and wound down with
//! [`shutdown`](AppContext::shutdown). Nothing in this module touches the
//! OS or a rendering layer: resolving the `System` theme takes the OS
//! preference as an argument, and applying the resolved theme is the
//! embedder's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;
use crate::storage::Storage;

/// Storage key for the persisted theme mode.
pub const THEME_KEY: &str = "theme_mode";
/// Storage key for the persisted locale.
pub const LOCALE_KEY: &str = "app_locale";

/// The user's theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the OS preference.
    #[default]
    System,
}

impl ThemeMode {
    /// The canonical string form, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(ContextError::UnknownThemeMode {
                value: other.to_string(),
            }),
        }
    }
}

/// A supported locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Bahasa Indonesia.
    Id,
}

impl Locale {
    /// The BCP-47-ish code, as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Id => "id",
        }
    }

    /// The locale's own name for itself, for language pickers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Id => "Bahasa Indonesia",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "id" => Ok(Self::Id),
            other => Err(ContextError::UnknownLocale {
                value: other.to_string(),
            }),
        }
    }
}

/// Builder for [`AppContext`].
///
/// # Example
///
/// ```rust
/// use adminkit::context::AppContext;
/// use adminkit::storage::MemoryStorage;
/// use adminkit::{Locale, ThemeMode};
///
/// let mut context = AppContext::builder()
///     .theme(ThemeMode::Dark)
///     .locale(Locale::Id)
///     .build(MemoryStorage::new());
///
/// context.init();
/// assert_eq!(context.theme(), ThemeMode::Dark);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AppContextBuilder {
    theme: ThemeMode,
    locale: Locale,
}

impl AppContextBuilder {
    /// Creates a builder with the default preferences
    /// ([`ThemeMode::System`], [`Locale::En`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial theme mode.
    #[must_use]
    pub const fn theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the initial locale.
    #[must_use]
    pub const fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Builds the context over the given storage.
    #[must_use]
    pub const fn build<S: Storage>(self, storage: S) -> AppContext<S> {
        AppContext {
            storage,
            theme: self.theme,
            locale: self.locale,
        }
    }
}

/// Application-wide preference state with write-through persistence.
///
/// Construct one per application, restore it with
/// [`init`](Self::init), pass it (or views of it) to whatever needs the
/// preferences, and call [`shutdown`](Self::shutdown) on the way out.
#[derive(Debug)]
pub struct AppContext<S: Storage> {
    storage: S,
    theme: ThemeMode,
    locale: Locale,
}

impl AppContext<crate::storage::MemoryStorage> {
    /// Creates a builder with default preferences.
    #[must_use]
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }
}

impl<S: Storage> AppContext<S> {
    /// Loads persisted preferences, keeping the built-in values for keys
    /// that are absent or unparseable.
    pub fn init(&mut self) {
        if let Some(mode) = self.storage.get(THEME_KEY).and_then(|raw| raw.parse().ok()) {
            self.theme = mode;
        }
        if let Some(locale) = self.storage.get(LOCALE_KEY).and_then(|raw| raw.parse().ok()) {
            self.locale = locale;
        }
    }

    /// The current theme mode.
    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// The current locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Sets and persists the theme mode.
    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        self.storage.set(THEME_KEY, theme.as_str());
    }

    /// Sets and persists the locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.storage.set(LOCALE_KEY, locale.as_str());
    }

    /// Resolves whether dark styling should be in effect.
    ///
    /// `system_prefers_dark` is the OS-level preference, supplied by the
    /// embedder; it only matters in [`ThemeMode::System`].
    #[must_use]
    pub const fn resolved_dark(&self, system_prefers_dark: bool) -> bool {
        match self.theme {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::System => system_prefers_dark,
        }
    }

    /// Flips between explicit light and dark, leaving `System`.
    ///
    /// The flip starts from the currently *resolved* appearance, so in
    /// `System` mode the first toggle pins the opposite of what the OS
    /// shows right now.
    pub fn toggle_theme(&mut self, system_prefers_dark: bool) {
        let next = if self.resolved_dark(system_prefers_dark) {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        };
        self.set_theme(next);
    }

    /// Persists the current preferences and releases the storage handle.
    pub fn shutdown(self) -> S {
        self.storage.set(THEME_KEY, self.theme.as_str());
        self.storage.set(LOCALE_KEY, self.locale.as_str());
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_theme_mode_parse_round_trip() {
        for mode in [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System] {
            assert_eq!(mode.as_str().parse::<ThemeMode>().unwrap(), mode);
        }
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_locale_parse_round_trip() {
        for locale in [Locale::En, Locale::Id] {
            assert_eq!(locale.as_str().parse::<Locale>().unwrap(), locale);
        }
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let context = AppContext::builder().build(MemoryStorage::new());
        assert_eq!(context.theme(), ThemeMode::System);
        assert_eq!(context.locale(), Locale::En);
    }

    #[test]
    fn test_init_restores_persisted_preferences() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "dark");
        storage.set(LOCALE_KEY, "id");

        let mut context = AppContext::builder().build(storage);
        context.init();

        assert_eq!(context.theme(), ThemeMode::Dark);
        assert_eq!(context.locale(), Locale::Id);
    }

    #[test]
    fn test_init_ignores_unparseable_values() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "hotdog-stand");

        let mut context = AppContext::builder().theme(ThemeMode::Light).build(storage);
        context.init();

        assert_eq!(context.theme(), ThemeMode::Light);
    }

    #[test]
    fn test_set_theme_writes_through() {
        let mut context = AppContext::builder().build(MemoryStorage::new());
        context.set_theme(ThemeMode::Dark);

        let storage = context.shutdown();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_resolved_dark_follows_system_only_in_system_mode() {
        let mut context = AppContext::builder().build(MemoryStorage::new());

        assert!(context.resolved_dark(true));
        assert!(!context.resolved_dark(false));

        context.set_theme(ThemeMode::Dark);
        assert!(context.resolved_dark(false));

        context.set_theme(ThemeMode::Light);
        assert!(!context.resolved_dark(true));
    }

    #[test]
    fn test_toggle_theme_flips_resolved_appearance() {
        let mut context = AppContext::builder().build(MemoryStorage::new());

        // System + OS dark -> first toggle pins light.
        context.toggle_theme(true);
        assert_eq!(context.theme(), ThemeMode::Light);

        context.toggle_theme(true);
        assert_eq!(context.theme(), ThemeMode::Dark);
    }

    #[test]
    fn test_shutdown_persists_both_preferences() {
        let mut context = AppContext::builder().build(MemoryStorage::new());
        context.set_locale(Locale::Id);

        let storage = context.shutdown();
        assert_eq!(storage.get(LOCALE_KEY).as_deref(), Some("id"));
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("system"));
    }
}
