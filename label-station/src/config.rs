//! Label station configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::labels::RenderOptions;

/// Label station configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | LABEL_SETTINGS_PATH | label-settings.json | Geometry presets file |
/// | LABEL_CATALOG_PATH | item-catalog.json | Item catalog file |
/// | PRINTER_CODEPAGE | utf-8 | Encoding of the payload sent to the printer |
/// | PRINTER_TIMEOUT_MS | 5000 | Printer connect timeout (ms) |
/// | ESCAPE_ALL_FIELDS | false | Sanitise barcode and item code like names |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | Daily rolling log directory |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub settings_path: PathBuf,
    pub catalog_path: PathBuf,
    pub codepage: String,
    pub printer_timeout_ms: u64,
    pub escape_all_fields: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparseable variables use the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            settings_path: var("LABEL_SETTINGS_PATH")
                .unwrap_or_else(|| "label-settings.json".into())
                .into(),
            catalog_path: var("LABEL_CATALOG_PATH")
                .unwrap_or_else(|| "item-catalog.json".into())
                .into(),
            codepage: var("PRINTER_CODEPAGE").unwrap_or_else(|| "utf-8".into()),
            printer_timeout_ms: var("PRINTER_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            escape_all_fields: var("ESCAPE_ALL_FIELDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: var("LOG_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
        }
    }

    pub fn printer_timeout(&self) -> Duration {
        Duration::from_millis(self.printer_timeout_ms)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escape_all_fields: self.escape_all_fields,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.settings_path, PathBuf::from("label-settings.json"));
        assert_eq!(c.catalog_path, PathBuf::from("item-catalog.json"));
        assert_eq!(c.codepage, "utf-8");
        assert_eq!(c.printer_timeout(), Duration::from_secs(5));
        assert!(!c.escape_all_fields);
        assert_eq!(c.log_level, "info");
        assert_eq!(c.log_dir, None);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LABEL_SETTINGS_PATH", "/etc/labels/settings.json"),
            ("PRINTER_CODEPAGE", "windows-1252"),
            ("PRINTER_TIMEOUT_MS", "soon"),
            ("ESCAPE_ALL_FIELDS", "true"),
            ("LOG_DIR", "/var/log/labels"),
        ]);
        let c = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(c.settings_path, PathBuf::from("/etc/labels/settings.json"));
        assert_eq!(c.codepage, "windows-1252");
        assert_eq!(c.printer_timeout_ms, 5000);
        assert!(c.render_options().escape_all_fields);
        assert_eq!(c.log_dir, Some(PathBuf::from("/var/log/labels")));
    }
}
