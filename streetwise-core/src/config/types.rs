//! Configuration type definitions

use crate::keypad::{KeyMap, KeypadLayout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Digit entry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntryConfig {
    /// Inactivity window before a partial entry is abandoned (at least 1 ms)
    pub timeout_ms: u32,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000 }
    }
}

/// Fade ("soft display") settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FadeConfig {
    /// How long the previous frame stays up after a fading enable
    pub window_ms: u32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self { window_ms: 10_000 }
    }
}

/// Oscilloscope settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScopeConfig {
    /// Sampling period; frames arriving in between are dropped
    pub interval_ms: u32,
    /// Index of the first sample drawn from each frame
    pub first_sample: u16,
    /// Distance between drawn samples
    pub stride: u16,
    /// Sample-to-pixel scale factor
    pub gain: f32,
    /// Largest deflection from the centre line, in pixels (at most 127)
    pub max_deflection: u8,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30,
            first_sample: 1,
            stride: 8,
            gain: 100.0,
            max_deflection: 31,
        }
    }
}

/// Indeterminate progress spinner settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressConfig {
    /// Time between spinner frames
    pub frame_ms: u32,
    /// Rotation per frame in degrees
    pub step_deg: u16,
    /// Arc length in degrees
    pub sweep_deg: u16,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            frame_ms: 20,
            step_deg: 2,
            sweep_deg: 120,
        }
    }
}

/// Keypad settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeypadConfig {
    /// Which key codes count as digits
    pub layout: KeypadLayout,
}

impl KeypadConfig {
    /// Build the key map for this configuration
    pub fn keymap(&self) -> KeyMap {
        KeyMap::for_layout(self.layout)
    }
}

/// Complete appliance configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ApplianceConfig {
    pub entry: EntryConfig,
    pub fade: FadeConfig,
    pub scope: ScopeConfig,
    pub progress: ProgressConfig,
    pub keypad: KeypadConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApplianceConfig::default();
        assert_eq!(config.entry.timeout_ms, 3000);
        assert_eq!(config.fade.window_ms, 10_000);
        assert_eq!(config.scope.interval_ms, 30);
        assert_eq!(config.scope.stride, 8);
        assert_eq!(config.progress.step_deg, 2);
        assert_eq!(config.keypad.layout, KeypadLayout::Both);
    }

    #[test]
    fn test_keypad_keymap() {
        let config = KeypadConfig {
            layout: KeypadLayout::Numpad,
        };
        assert_eq!(config.keymap().len(), 10);
    }
}
