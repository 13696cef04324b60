//! Shell configuration

use crate::error::{ShellError, ShellResult};
use crate::types::{Rgba, WindowSize};
use serde::{Deserialize, Serialize};
use url::Url;

/// Page loaded at startup and by the home button
pub const HOME_URL: &str = "https://diamondgotcat.net/";

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Page loaded at startup and by the home button
    pub home_url: String,

    /// Window title before the first page reports one
    pub window_title: String,

    /// Size the window opens at
    pub initial_size: WindowSize,

    /// Smallest size the window may be resized to
    pub min_size: WindowSize,

    /// Height of the toolbar strip above the content view
    pub toolbar_height: f64,

    /// Window and webview background
    pub background: Rgba,

    /// Enable webview devtools
    pub devtools: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: HOME_URL.to_string(),
            window_title: "Diamond".to_string(),
            initial_size: WindowSize::new(1024.0, 768.0),
            min_size: WindowSize::new(800.0, 600.0),
            toolbar_height: 40.0,
            background: Rgba::BLACK,
            devtools: cfg!(debug_assertions),
        }
    }
}

impl ShellConfig {
    /// Check the configuration before any window is created
    pub fn validate(&self) -> ShellResult<()> {
        let home = Url::parse(&self.home_url)?;
        if !matches!(home.scheme(), "http" | "https") {
            return Err(ShellError::config(format!(
                "home URL must be http(s), got {}",
                home.scheme()
            )));
        }
        if !self.initial_size.covers(&self.min_size) {
            return Err(ShellError::config("initial window size is below the minimum"));
        }
        if self.toolbar_height <= 0.0 || self.toolbar_height >= self.min_size.height {
            return Err(ShellError::config("toolbar height must fit inside the window"));
        }
        Ok(())
    }

    /// Home URL in the canonical form the engine reports back
    pub fn canonical_home_url(&self) -> ShellResult<String> {
        Ok(Url::parse(&self.home_url)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ShellConfig::default();
        config.validate().unwrap();
        assert_eq!(config.home_url, "https://diamondgotcat.net/");
        assert_eq!(config.min_size, WindowSize::new(800.0, 600.0));
        assert_eq!(config.background, Rgba::BLACK);
    }

    #[test]
    fn test_rejects_non_http_home() {
        let config = ShellConfig {
            home_url: "file:///etc/hosts".to_string(),
            ..ShellConfig::default()
        };
        assert!(matches!(config.validate(), Err(ShellError::Config(_))));
    }

    #[test]
    fn test_rejects_unparseable_home() {
        let config = ShellConfig {
            home_url: "diamondgotcat".to_string(),
            ..ShellConfig::default()
        };
        assert!(matches!(config.validate(), Err(ShellError::Url(_))));
    }

    #[test]
    fn test_rejects_window_below_minimum() {
        let config = ShellConfig {
            initial_size: WindowSize::new(640.0, 480.0),
            ..ShellConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_canonical_home_url() {
        let config = ShellConfig {
            home_url: "HTTPS://DiamondGotCat.net".to_string(),
            ..ShellConfig::default()
        };
        assert_eq!(
            config.canonical_home_url().unwrap(),
            "https://diamondgotcat.net/"
        );
    }
}
