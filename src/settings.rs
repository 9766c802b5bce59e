//! Persisted user settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Popup size in pixels.
    pub width: u32,
    pub height: u32,
    /// Mnemonic combined with Alt for the global show/hide hotkey.
    pub hotkey: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 295,
            height: 400,
            hotkey: 'v',
        }
    }
}

impl Settings {
    /// Hotkeys are stored lowercase; anything non-alphanumeric is rejected.
    pub fn set_hotkey(&mut self, hotkey: char) -> bool {
        if hotkey.is_ascii_alphanumeric() {
            self.hotkey = hotkey.to_ascii_lowercase();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_product() {
        let s = Settings::default();
        assert_eq!((s.width, s.height, s.hotkey), (295, 400, 'v'));
    }

    #[test]
    fn hotkey_validation() {
        let mut s = Settings::default();
        assert!(s.set_hotkey('B'));
        assert_eq!(s.hotkey, 'b');
        assert!(!s.set_hotkey('!'));
        assert_eq!(s.hotkey, 'b');
    }
}
