//! Reader settings management
//!
//! Timing, geometry and gesture constants for the reading surface, with
//! JSON persistence. Every section is defaulted so a partial file only
//! overrides what it names.

use crate::Result;
use reading_model::HighlightPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main reader settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReaderSettings {
    /// Debounce and auto-hide delays
    pub timing: TimingSettings,
    /// Selection menu geometry
    pub menu: MenuSettings,
    /// Touch classification thresholds
    pub gestures: GestureSettings,
    /// Highlight rendering and action options
    pub highlights: HighlightSettings,
    /// Host platform capabilities
    pub surface: SurfaceSettings,
}

/// Delays for the deferred callbacks of the reading surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingSettings {
    /// Quiet period after the last selection change before the menu shows
    pub selection_menu_delay_ms: u64,
    /// Inactivity before the toolbar hides itself
    pub toolbar_hide_delay_ms: u64,
    /// How long the "Copied" confirmation stays up
    pub copy_confirmation_ms: u64,
    /// Quiet period after the last scroll event before scrolling ends
    pub scroll_settle_ms: u64,
    /// Simulated assistant thinking time
    pub chat_response_delay_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            selection_menu_delay_ms: 500,
            toolbar_hide_delay_ms: 3000,
            copy_confirmation_ms: 2000,
            scroll_settle_ms: 500,
            chat_response_delay_ms: 2000,
        }
    }
}

impl TimingSettings {
    pub fn selection_menu_delay(&self) -> Duration {
        Duration::from_millis(self.selection_menu_delay_ms)
    }

    pub fn toolbar_hide_delay(&self) -> Duration {
        Duration::from_millis(self.toolbar_hide_delay_ms)
    }

    pub fn copy_confirmation(&self) -> Duration {
        Duration::from_millis(self.copy_confirmation_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn chat_response_delay(&self) -> Duration {
        Duration::from_millis(self.chat_response_delay_ms)
    }
}

/// Selection menu geometry, in screen points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MenuSettings {
    /// Menu width
    pub width: f64,
    /// Menu height
    pub height: f64,
    /// Minimum distance between the menu and the viewport edges
    pub margin: f64,
    /// Menus placed above this line flip below the selection
    pub safe_top: f64,
    /// Space between the selected line and the menu
    pub gap: f64,
    /// Line height of paragraph text
    pub line_height: f64,
    /// Average characters per rendered line, used to estimate line numbers
    pub chars_per_line: usize,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 48.0,
            margin: 10.0,
            safe_top: 60.0,
            gap: 16.0,
            line_height: 24.0,
            chars_per_line: 40,
        }
    }
}

/// Thresholds used to classify raw touches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureSettings {
    /// Longest touch still counted as a tap
    pub tap_max_duration_ms: u64,
    /// Largest finger movement still counted as a tap
    pub tap_max_distance: f64,
    /// Downward drag on the chat sheet that closes it
    pub chat_close_drag: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: 300,
            tap_max_distance: 10.0,
            chat_close_drag: 50.0,
        }
    }
}

impl GestureSettings {
    /// Whether a released touch was a tap rather than a drag or hold
    pub fn is_tap(&self, duration_ms: u64, distance: f64) -> bool {
        duration_ms < self.tap_max_duration_ms && distance.abs() < self.tap_max_distance
    }

    /// Whether a released sheet drag should close the chat
    pub fn closes_chat(&self, dy: f64) -> bool {
        dy > self.chat_close_drag
    }
}

/// Highlight rendering and selection action options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HighlightSettings {
    /// Which highlights of a paragraph are drawn
    pub policy: HighlightPolicy,
    /// Whether the action menu offers Copy
    pub offer_copy: bool,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            policy: HighlightPolicy::RenderAll,
            offer_copy: true,
        }
    }
}

/// Capabilities of the host text surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceSettings {
    /// The host can draw a custom selection overlay with native selection
    /// menus disabled. When set, the engine asks for native menus to be
    /// suppressed whenever a selection starts or changes.
    pub custom_selection_overlay: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            custom_selection_overlay: true,
        }
    }
}

/// Settings manager for loading, saving, and updating reader settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ReaderSettings,
}

impl SettingsManager {
    /// Create a settings manager for a file inside `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_path(data_dir.as_ref().join("reader_settings.json"))
    }

    /// Create a settings manager for an explicit settings file
    pub fn with_path(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            current: ReaderSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load(&mut self) -> Result<&ReaderSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<ReaderSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse reader settings, using defaults: {}",
                        e
                    );
                    self.current = ReaderSettings::default();
                }
            }
        } else {
            tracing::debug!("No settings at {:?}, using defaults", self.settings_path);
            self.current = ReaderSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &ReaderSettings {
        &self.current
    }

    /// Replace settings and save to disk
    pub fn update(&mut self, settings: ReaderSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&ReaderSettings> {
        self.current = ReaderSettings::default();
        self.save()?;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = ReaderSettings::default();
        assert_eq!(settings.timing.selection_menu_delay(), Duration::from_millis(500));
        assert_eq!(settings.timing.toolbar_hide_delay(), Duration::from_secs(3));
        assert_eq!(settings.menu.width, 300.0);
        assert_eq!(settings.highlights.policy, HighlightPolicy::RenderAll);
        assert!(settings.surface.custom_selection_overlay);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let json = r#"{ "timing": { "selection_menu_delay_ms": 200 }, "highlights": { "policy": "render_first" } }"#;
        let settings: ReaderSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.timing.selection_menu_delay_ms, 200);
        assert_eq!(settings.timing.copy_confirmation_ms, 2000);
        assert_eq!(settings.highlights.policy, HighlightPolicy::RenderFirst);
        assert!(settings.highlights.offer_copy);
        assert_eq!(settings.menu, MenuSettings::default());
    }

    #[test]
    fn test_tap_classification() {
        let gestures = GestureSettings::default();
        assert!(gestures.is_tap(120, 3.0));
        assert!(!gestures.is_tap(300, 3.0));
        assert!(!gestures.is_tap(120, 12.0));
        assert!(gestures.closes_chat(51.0));
        assert!(!gestures.closes_chat(50.0));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(dir.path());
        let settings = manager.load().unwrap();
        assert_eq!(*settings, ReaderSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(dir.path().join("nested"));

        let mut settings = ReaderSettings::default();
        settings.menu.chars_per_line = 52;
        settings.highlights.offer_copy = false;
        manager.update(settings.clone()).unwrap();
        assert!(manager.settings_path().exists());

        let mut reloaded = SettingsManager::new(dir.path().join("nested"));
        assert_eq!(*reloaded.load().unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(dir.path());
        std::fs::write(manager.settings_path(), "{ not json").unwrap();

        let settings = manager.load().unwrap();
        assert_eq!(*settings, ReaderSettings::default());
    }

    #[test]
    fn test_reset_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(dir.path());
        let mut settings = ReaderSettings::default();
        settings.timing.scroll_settle_ms = 1;
        manager.update(settings).unwrap();

        manager.reset().unwrap();
        let content = std::fs::read_to_string(manager.settings_path()).unwrap();
        let on_disk: ReaderSettings = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk, ReaderSettings::default());
    }
}
