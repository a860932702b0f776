//! Drift configuration file handling (drift.toml)

use crate::error::{DriftError, Result};
use anyhow::Context;
use drift_animation::{ArcLayout, BurstConfig, CursorConfig, KinematicsConfig, PresenceConfig};
use drift_core::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the config file looked up in a directory
pub const CONFIG_FILE: &str = "drift.toml";

/// Top-level Drift configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub kinematics: KinematicsConfig,
    #[serde(default)]
    pub layout: ArcLayout,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub burst: BurstConfig,
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub floaters: FloatersConfig,
}

/// Frame loop and surface settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FrameConfig {
    #[serde(default = "default_fps")]
    pub target_fps: u32,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Seed for every randomized layout, burst and floater
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_fps() -> u32 {
    60
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_seed() -> u64 {
    0x5EED
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: default_fps(),
            width: default_width(),
            height: default_height(),
            seed: default_seed(),
        }
    }
}

impl FrameConfig {
    pub fn viewport(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Profile page face
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ProfileConfig {
    /// Clicks closer than this to the face center launch a burst
    #[serde(default = "default_face_radius")]
    pub face_radius: f32,
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f32,
    #[serde(default = "default_ring_count")]
    pub ring_count: usize,
}

fn default_face_radius() -> f32 {
    96.0
}

fn default_ring_radius() -> f32 {
    300.0
}

fn default_ring_count() -> usize {
    6
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            face_radius: default_face_radius(),
            ring_radius: default_ring_radius(),
            ring_count: default_ring_count(),
        }
    }
}

/// Decorative floater counts per page
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FloatersConfig {
    #[serde(default = "default_twinkles")]
    pub roadmap_twinkles: usize,
    #[serde(default = "default_drifters")]
    pub roadmap_drifters: usize,
    #[serde(default = "default_bubbles")]
    pub contacts_bubbles: usize,
}

fn default_twinkles() -> usize {
    100
}

fn default_drifters() -> usize {
    20
}

fn default_bubbles() -> usize {
    8
}

impl Default for FloatersConfig {
    fn default() -> Self {
        Self {
            roadmap_twinkles: default_twinkles(),
            roadmap_drifters: default_drifters(),
            contacts_bubbles: default_bubbles(),
        }
    }
}

impl DriftConfig {
    /// Load configuration from a directory (looks for drift.toml) or a file
    pub fn load_from_dir(path: &Path) -> anyhow::Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {CONFIG_FILE} found in {}. Run `drift init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: DriftConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Reject values the motion rules cannot work with
    pub fn validate(&self) -> Result<()> {
        self.check_all_finite()?;

        let k = &self.kinematics;
        if !(k.damping > 0.0 && k.damping < 1.0) {
            return Err(DriftError::invalid(
                "kinematics.damping",
                format!("{} is not inside (0, 1)", k.damping),
            ));
        }
        if k.repulsion_radius <= 0.0 {
            return Err(DriftError::invalid(
                "kinematics.repulsion_radius",
                "must be positive",
            ));
        }
        if k.release_radius < k.repulsion_radius {
            return Err(DriftError::invalid(
                "kinematics.release_radius",
                format!(
                    "{} is below the repulsion radius {}",
                    k.release_radius, k.repulsion_radius
                ),
            ));
        }
        check_non_negative("kinematics.repulsion_strength", k.repulsion_strength)?;
        check_non_negative("kinematics.return_stiffness", k.return_stiffness)?;
        check_non_negative("kinematics.max_return_impulse", k.max_return_impulse)?;
        check_non_negative("kinematics.jitter_amplitude", k.jitter_amplitude)?;

        check_non_negative("layout.initial_speed", self.layout.initial_speed)?;

        let c = &self.cursor;
        if !(c.smoothing > 0.0 && c.smoothing <= 1.0) {
            return Err(DriftError::invalid(
                "cursor.smoothing",
                format!("{} is not inside (0, 1]", c.smoothing),
            ));
        }
        if c.cooldown_ms <= 0.0 {
            return Err(DriftError::invalid("cursor.cooldown_ms", "must be positive"));
        }
        if c.trigger_radius <= 0.0 {
            return Err(DriftError::invalid("cursor.trigger_radius", "must be positive"));
        }
        check_non_negative("cursor.kick_strength", c.kick_strength)?;

        check_non_negative("burst.spread_x", self.burst.spread_x)?;
        if self.burst.max_vy < self.burst.min_vy {
            return Err(DriftError::invalid(
                "burst.max_vy",
                "must not be below burst.min_vy",
            ));
        }

        check_non_negative("presence.face_limit", self.presence.face_limit)?;

        let f = &self.frame;
        if f.target_fps == 0 {
            return Err(DriftError::invalid("frame.target_fps", "must be > 0"));
        }
        if f.width == 0 || f.height == 0 {
            return Err(DriftError::invalid("frame.width", "surface must be non-empty"));
        }

        Ok(())
    }

    fn check_all_finite(&self) -> Result<()> {
        let k = &self.kinematics;
        let l = &self.layout;
        let c = &self.cursor;
        let b = &self.burst;
        let p = &self.presence;
        let fields: [(&'static str, f64); 30] = [
            ("kinematics.repulsion_radius", k.repulsion_radius.into()),
            ("kinematics.release_radius", k.release_radius.into()),
            ("kinematics.repulsion_strength", k.repulsion_strength.into()),
            ("kinematics.return_stiffness", k.return_stiffness.into()),
            ("kinematics.max_return_impulse", k.max_return_impulse.into()),
            ("kinematics.jitter_amplitude", k.jitter_amplitude.into()),
            ("kinematics.damping", k.damping.into()),
            ("layout.center.x", l.center.x.into()),
            ("layout.center.y", l.center.y.into()),
            ("layout.base_radius", l.base_radius.into()),
            ("layout.radius_step", l.radius_step.into()),
            ("layout.vertical_scale", l.vertical_scale.into()),
            ("layout.initial_speed", l.initial_speed.into()),
            ("cursor.smoothing", c.smoothing.into()),
            ("cursor.trigger_radius", c.trigger_radius.into()),
            ("cursor.kick_strength", c.kick_strength.into()),
            ("cursor.cooldown_ms", c.cooldown_ms),
            ("cursor.orbit_step", c.orbit_step.into()),
            ("cursor.scale_duration_ms", c.scale_duration_ms),
            ("burst.spread_x", b.spread_x.into()),
            ("burst.min_vy", b.min_vy.into()),
            ("burst.max_vy", b.max_vy.into()),
            ("burst.gravity", b.gravity.into()),
            ("presence.breath_step", p.breath_step.into()),
            ("presence.breath_depth", p.breath_depth.into()),
            ("presence.face_follow", p.face_follow.into()),
            ("presence.face_limit", p.face_limit.into()),
            ("presence.eye_follow", p.eye_follow.into()),
            ("profile.face_radius", self.profile.face_radius.into()),
            ("profile.ring_radius", self.profile.ring_radius.into()),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DriftError::invalid(field, format!("{value} is not finite")));
            }
        }
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: impl Into<f64>) -> Result<()> {
    let value = value.into();
    if value < 0.0 {
        return Err(DriftError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = DriftConfig::from_toml("").unwrap();
        assert_eq!(config, DriftConfig::default());
        assert_eq!(config.kinematics.damping, 0.95);
        assert_eq!(config.cursor.cooldown_ms, 1200.0);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = DriftConfig::from_toml(
            r#"
            [kinematics]
            repulsion_radius = 120.0
            release_radius = 180.0

            [cursor]
            cooldown_ms = 800.0

            [layout]
            center = { x = 400.0, y = 300.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.kinematics.repulsion_radius, 120.0);
        assert_eq!(config.kinematics.damping, 0.95);
        assert_eq!(config.cursor.cooldown_ms, 800.0);
        assert_eq!(config.cursor.smoothing, 0.2);
        assert_eq!(config.layout.center.x, 400.0);
        assert_eq!(config.layout.left_count, 6);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = DriftConfig::default();
        config.frame.seed = 11;
        let text = config.to_toml().unwrap();
        assert_eq!(DriftConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_damping_outside_unit_interval() {
        let err = DriftConfig::from_toml("[kinematics]\ndamping = 1.0\n").unwrap_err();
        let err = err.downcast::<DriftError>().unwrap();
        assert!(matches!(
            err,
            DriftError::InvalidConfig {
                field: "kinematics.damping",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_hysteresis() {
        let mut config = DriftConfig::default();
        config.kinematics.release_radius = 100.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("release_radius"));
    }

    #[test]
    fn test_rejects_zero_smoothing() {
        let mut config = DriftConfig::default();
        config.cursor.smoothing = 0.0;
        assert!(config.validate().is_err());
    }

    fn rejected_field(toml: &str) -> &'static str {
        let err = DriftConfig::from_toml(toml).unwrap_err();
        match err.downcast::<DriftError>().unwrap() {
            DriftError::InvalidConfig { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert_eq!(rejected_field("[layout]\ninitial_speed = inf\n"), "layout.initial_speed");
        assert_eq!(rejected_field("[burst]\nspread_x = inf\n"), "burst.spread_x");
        assert_eq!(
            rejected_field("[kinematics]\nrepulsion_strength = nan\n"),
            "kinematics.repulsion_strength"
        );
        assert_eq!(rejected_field("[cursor]\ncooldown_ms = inf\n"), "cursor.cooldown_ms");
        assert_eq!(rejected_field("[layout]\ncenter = { x = nan, y = 0.0 }\n"), "layout.center.x");
    }

    #[test]
    fn test_rejects_negative_magnitudes() {
        assert_eq!(rejected_field("[burst]\nspread_x = -1.0\n"), "burst.spread_x");
        assert_eq!(rejected_field("[layout]\ninitial_speed = -0.5\n"), "layout.initial_speed");
        assert_eq!(
            rejected_field("[kinematics]\nrepulsion_strength = -2.0\n"),
            "kinematics.repulsion_strength"
        );
        assert_eq!(rejected_field("[cursor]\nkick_strength = -3.0\n"), "cursor.kick_strength");
    }

    #[test]
    fn test_zero_magnitudes_are_allowed() {
        let config = DriftConfig::from_toml(
            "[layout]\ninitial_speed = 0.0\n[burst]\nspread_x = 0.0\n",
        )
        .unwrap();
        assert_eq!(config.layout.initial_speed, 0.0);
        assert_eq!(config.burst.spread_x, 0.0);
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let dir = std::env::temp_dir().join("drift-config-missing-test");
        let err = DriftConfig::load_from_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("drift init"));
    }
}
