//! Configuration: Tunable parameters for the trail engine.
//!
//! [`Config`] is an immutable-per-frame snapshot. The frame scheduler owns
//! the live copy and hands `&Config` into every per-frame operation;
//! updates arrive as named [`ConfigValue`]s and are merged only at tick
//! boundaries.
//!
//! Every setting is addressable by its flat key (`line_width`,
//! `left_click_release_color`, `cursor_image_path`, ...), which is also its
//! name in the settings file managed by [`ConfigStore`].

mod store;

pub use store::ConfigStore;

use crate::color::Rgb;
use crate::error::{ConfigError, ConfigResult};
use crate::trail::{ClickPhase, MouseButton};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Upper bound for sub-segment interpolation steps.
pub const MAX_SMOOTHING_STEPS: u32 = 32;

/// Upper bound for `line_lifespan` and `recenter_timeout_seconds`.
pub const MAX_SECONDS: f64 = 86_400.0;

/// Upper bound for `|coordinate_multiplier|`.
pub const MAX_COORDINATE_MULTIPLIER: f64 = 1_000.0;

/// Trail drawing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineStyle {
    /// Constant-width polyline, no fade.
    #[serde(rename = "original")]
    Uniform,
    /// One continuous ribbon polygon tapering with age.
    #[default]
    #[serde(rename = "smooth_fade")]
    SmoothFade,
    /// A chain of per-segment trapezoids tapering with age.
    #[serde(rename = "jagged_fade", alias = "jagged")]
    JaggedFade,
}

impl LineStyle {
    /// Settings-file name of the style.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "original",
            Self::SmoothFade => "smooth_fade",
            Self::JaggedFade => "jagged_fade",
        }
    }

    /// Whether sub-segment interpolation applies to this style.
    pub const fn smooths(self) -> bool {
        matches!(self, Self::Uniform | Self::SmoothFade)
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "original" | "uniform" => Ok(Self::Uniform),
            "smooth_fade" => Ok(Self::SmoothFade),
            "jagged_fade" | "jagged" => Ok(Self::JaggedFade),
            other => Err(format!("unknown line style {other:?}")),
        }
    }
}

/// Where the cursor glyph sits relative to the pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorAlignment {
    /// Glyph centered on the pointer.
    #[default]
    Center,
    /// Glyph's top-left corner at the pointer.
    #[serde(rename = "Top-Left")]
    TopLeft,
    /// Glyph's top-right corner at the pointer.
    #[serde(rename = "Top-Right")]
    TopRight,
    /// Glyph's bottom-left corner at the pointer.
    #[serde(rename = "Bottom-Left")]
    BottomLeft,
    /// Glyph's bottom-right corner at the pointer.
    #[serde(rename = "Bottom-Right")]
    BottomRight,
}

impl CursorAlignment {
    /// Settings-file name of the alignment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "Center",
            Self::TopLeft => "Top-Left",
            Self::TopRight => "Top-Right",
            Self::BottomLeft => "Bottom-Left",
            Self::BottomRight => "Bottom-Right",
        }
    }
}

impl FromStr for CursorAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "center" | "centre" => Ok(Self::Center),
            "topleft" => Ok(Self::TopLeft),
            "topright" => Ok(Self::TopRight),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(format!("unknown cursor alignment {s:?}")),
        }
    }
}

/// A dynamically typed setting value, as produced by a settings UI or file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Floating-point number.
    Float(f64),
    /// Integer.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Free text (colors, enum names, paths, or numbers typed as text).
    Text(String),
}

impl ConfigValue {
    fn to_f64(&self, key: &str) -> ConfigResult<f64> {
        let v = match self {
            Self::Float(v) => *v,
            Self::Int(v) => *v as f64,
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::invalid(key, e.to_string()))?,
            Self::Bool(_) => return Err(ConfigError::invalid(key, "expected a number")),
        };
        if v.is_finite() {
            Ok(v)
        } else {
            Err(ConfigError::invalid(key, "must be finite"))
        }
    }

    fn to_i64(&self, key: &str) -> ConfigResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(*v as i64),
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::invalid(key, e.to_string())),
            _ => Err(ConfigError::invalid(key, "expected an integer")),
        }
    }

    fn to_bool(&self, key: &str) -> ConfigResult<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            Self::Int(v) => Ok(*v != 0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                other => Err(ConfigError::invalid(key, format!("not a boolean: {other:?}"))),
            },
            Self::Float(_) => Err(ConfigError::invalid(key, "expected a boolean")),
        }
    }

    fn as_text(&self, key: &str) -> ConfigResult<&str> {
        match self {
            Self::Text(s) => Ok(s.as_str()),
            _ => Err(ConfigError::invalid(key, "expected text")),
        }
    }

    fn to_color(&self, key: &str) -> ConfigResult<Rgb> {
        self.as_text(key)?
            .parse()
            .map_err(|e: crate::error::ColorParseError| ConfigError::invalid(key, e.to_string()))
    }

    fn to_path(&self, key: &str) -> ConfigResult<Option<PathBuf>> {
        let text = self.as_text(key)?.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("none") {
            Ok(None)
        } else {
            Ok(Some(PathBuf::from(text)))
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

bitflags! {
    /// Groups of settings touched by an update.
    ///
    /// The scheduler uses these to decide what to invalidate at the next
    /// tick (e.g. cached glyphs when image overrides change).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConfigChanges: u8 {
        /// Frame interval or lifespan.
        const TIMING = 0b0000_0001;
        /// Line width, color, style, smoothing.
        const TRAIL = 0b0000_0010;
        /// Click marker colors, radii, or images.
        const CLICKS = 0b0000_0100;
        /// Cursor glyph, alignment, z-order.
        const CURSOR = 0b0000_1000;
        /// Canvas background color.
        const BACKGROUND = 0b0001_0000;
        /// Window geometry.
        const WINDOW = 0b0010_0000;
        /// Motion scaling and recenter policy.
        const MOTION = 0b0100_0000;
    }
}

/// A substitute image for a cursor or click marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverride {
    /// Image location, resolved by a glyph source.
    pub path: PathBuf,
    /// Scale factor applied when loading.
    pub scale: f64,
}

/// Resolved appearance of one click marker category.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Fill and outline color of the shape marker.
    pub color: Rgb,
    /// Shape marker radius in pixels.
    pub radius: f64,
    /// Substitute image, if enabled for this category.
    pub image: Option<ImageOverride>,
}

/// Snapshot of every tunable parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds a trail point or click stays visible.
    pub line_lifespan: f64,
    /// Milliseconds between the end of one frame and the start of the next.
    pub frame_interval: u64,
    /// Base trail width in pixels.
    pub line_width: f64,
    /// Trail color.
    pub line_color: Rgb,
    /// Canvas background color.
    pub canvas_bg_color: Rgb,
    /// Scale applied to every incoming motion delta.
    pub coordinate_multiplier: f64,
    /// Trail drawing algorithm.
    pub line_style: LineStyle,
    /// Sub-segment interpolation steps (1 disables interpolation).
    pub smoothing_steps: u32,

    /// Left button press marker color.
    pub left_click_color: Rgb,
    /// Left button press marker radius.
    pub left_click_radius: f64,
    /// Right button press marker color.
    pub right_click_color: Rgb,
    /// Right button press marker radius.
    pub right_click_radius: f64,
    /// Left button release marker color.
    pub left_click_release_color: Rgb,
    /// Left button release marker radius.
    pub left_click_release_radius: f64,
    /// Right button release marker color.
    pub right_click_release_color: Rgb,
    /// Right button release marker radius.
    pub right_click_release_radius: f64,

    /// Recenter after `recenter_timeout_seconds` without activity.
    pub auto_recenter_enabled: bool,
    /// Inactivity timeout for auto-recenter.
    pub recenter_timeout_seconds: f64,

    /// Draw the cursor glyph above the click markers.
    pub cursor_on_top: bool,
    /// Cursor glyph anchor.
    pub cursor_alignment: CursorAlignment,

    /// Draw the cursor glyph.
    pub cursor_image_enabled: bool,
    /// Cursor glyph path.
    pub cursor_image_path: Option<PathBuf>,
    /// Cursor glyph scale.
    pub cursor_image_scale: f64,
    /// Use an image for left press markers.
    pub left_click_image_enabled: bool,
    /// Left press marker image path.
    pub left_click_image_path: Option<PathBuf>,
    /// Left press marker image scale.
    pub left_click_image_scale: f64,
    /// Use an image for right press markers.
    pub right_click_image_enabled: bool,
    /// Right press marker image path.
    pub right_click_image_path: Option<PathBuf>,
    /// Right press marker image scale.
    pub right_click_image_scale: f64,
    /// Use an image for left release markers.
    pub left_click_release_image_enabled: bool,
    /// Left release marker image path.
    pub left_click_release_image_path: Option<PathBuf>,
    /// Left release marker image scale.
    pub left_click_release_image_scale: f64,
    /// Use an image for right release markers.
    pub right_click_release_image_enabled: bool,
    /// Right release marker image path.
    pub right_click_release_image_path: Option<PathBuf>,
    /// Right release marker image scale.
    pub right_click_release_image_scale: f64,

    /// Window width at last shutdown.
    pub window_width: u32,
    /// Window height at last shutdown.
    pub window_height: u32,
    /// Window x position at last shutdown.
    pub window_x: Option<i32>,
    /// Window y position at last shutdown.
    pub window_y: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_lifespan: 0.66,
            frame_interval: 30,
            line_width: 4.0,
            line_color: Rgb::WHITE,
            canvas_bg_color: Rgb::BLACK,
            coordinate_multiplier: 1.0,
            line_style: LineStyle::SmoothFade,
            smoothing_steps: 1,
            left_click_color: Rgb::RED,
            left_click_radius: 5.0,
            right_click_color: Rgb::BLUE,
            right_click_radius: 5.0,
            left_click_release_color: Rgb::GREEN,
            left_click_release_radius: 3.0,
            right_click_release_color: Rgb::LIME_GREEN,
            right_click_release_radius: 3.0,
            auto_recenter_enabled: true,
            recenter_timeout_seconds: 2.0,
            cursor_on_top: true,
            cursor_alignment: CursorAlignment::Center,
            cursor_image_enabled: false,
            cursor_image_path: None,
            cursor_image_scale: 1.0,
            left_click_image_enabled: false,
            left_click_image_path: None,
            left_click_image_scale: 1.0,
            right_click_image_enabled: false,
            right_click_image_path: None,
            right_click_image_scale: 1.0,
            left_click_release_image_enabled: false,
            left_click_release_image_path: None,
            left_click_release_image_scale: 1.0,
            right_click_release_image_enabled: false,
            right_click_release_image_path: None,
            right_click_release_image_scale: 1.0,
            window_width: 800,
            window_height: 600,
            window_x: None,
            window_y: None,
        }
    }
}

fn positive(key: &str, v: f64) -> ConfigResult<f64> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ConfigError::invalid(key, "must be greater than zero"))
    }
}

fn non_negative(key: &str, v: f64) -> ConfigResult<f64> {
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(ConfigError::invalid(key, "must not be negative"))
    }
}

fn at_most(key: &str, v: f64, max: f64) -> ConfigResult<f64> {
    if v.abs() <= max {
        Ok(v)
    } else {
        Err(ConfigError::invalid(key, format!("magnitude must be at most {max}")))
    }
}

fn in_range<T>(key: &str, v: i64, lo: i64, hi: i64) -> ConfigResult<T>
where
    T: TryFrom<i64>,
{
    if !(lo..=hi).contains(&v) {
        return Err(ConfigError::invalid(key, format!("must be in {lo}..={hi}")));
    }
    T::try_from(v).map_err(|_| ConfigError::invalid(key, "out of range"))
}

fn parse_text<T: FromStr<Err = String>>(key: &str, value: &ConfigValue) -> ConfigResult<T> {
    value
        .as_text(key)?
        .parse()
        .map_err(|e: String| ConfigError::invalid(key, e))
}

/// Seconds as a `Duration`; negative or NaN is zero, overflow saturates.
fn seconds(v: f64) -> Duration {
    Duration::try_from_secs_f64(v.max(0.0)).unwrap_or(Duration::MAX)
}

/// Expands `field: value => GROUP` rows into the `Config::set` dispatch.
/// Each row's key is its field name.
macro_rules! settings {
    ($config:ident, $key:ident { $($field:ident: $value:expr => $group:ident,)* }) => {
        match $key {
            $(stringify!($field) => {
                $config.$field = $value;
                ConfigChanges::$group
            })*
            _ => return Err(ConfigError::UnknownKey($key.to_string())),
        }
    };
}

impl Config {
    /// How long trail entries and clicks stay alive.
    #[inline]
    pub fn lifespan(&self) -> Duration {
        seconds(self.line_lifespan)
    }

    /// Delay between frame ticks.
    #[inline]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval)
    }

    /// Inactivity timeout for auto-recenter.
    #[inline]
    pub fn recenter_timeout(&self) -> Duration {
        seconds(self.recenter_timeout_seconds)
    }

    /// Marker appearance for a button and phase.
    ///
    /// The image is only present when its category is enabled and has a path.
    pub fn marker(&self, button: MouseButton, phase: ClickPhase) -> MarkerStyle {
        let (color, radius, enabled, path, scale) = match (button, phase) {
            (MouseButton::Left, ClickPhase::Pressed) => (
                self.left_click_color,
                self.left_click_radius,
                self.left_click_image_enabled,
                &self.left_click_image_path,
                self.left_click_image_scale,
            ),
            (MouseButton::Left, ClickPhase::Released) => (
                self.left_click_release_color,
                self.left_click_release_radius,
                self.left_click_release_image_enabled,
                &self.left_click_release_image_path,
                self.left_click_release_image_scale,
            ),
            (MouseButton::Right, ClickPhase::Pressed) => (
                self.right_click_color,
                self.right_click_radius,
                self.right_click_image_enabled,
                &self.right_click_image_path,
                self.right_click_image_scale,
            ),
            (MouseButton::Right, ClickPhase::Released) => (
                self.right_click_release_color,
                self.right_click_release_radius,
                self.right_click_release_image_enabled,
                &self.right_click_release_image_path,
                self.right_click_release_image_scale,
            ),
        };

        MarkerStyle {
            color,
            radius,
            image: image_override(enabled, path.as_ref(), scale),
        }
    }

    /// Cursor glyph, if enabled and configured.
    pub fn cursor_image(&self) -> Option<ImageOverride> {
        image_override(
            self.cursor_image_enabled,
            self.cursor_image_path.as_ref(),
            self.cursor_image_scale,
        )
    }

    /// Apply one named setting.
    ///
    /// On error the setting keeps its prior value.
    pub fn set(&mut self, key: &str, value: &ConfigValue) -> ConfigResult<ConfigChanges> {
        let changed = settings!(self, key {
            line_lifespan: at_most(key, positive(key, value.to_f64(key)?)?, MAX_SECONDS)? => TIMING,
            frame_interval: in_range(key, value.to_i64(key)?, 1, 10_000)? => TIMING,
            line_width: non_negative(key, value.to_f64(key)?)? => TRAIL,
            line_color: value.to_color(key)? => TRAIL,
            canvas_bg_color: value.to_color(key)? => BACKGROUND,
            coordinate_multiplier: at_most(key, value.to_f64(key)?, MAX_COORDINATE_MULTIPLIER)? => MOTION,
            line_style: parse_text(key, value)? => TRAIL,
            smoothing_steps: in_range(key, value.to_i64(key)?, 1, i64::from(MAX_SMOOTHING_STEPS))? => TRAIL,

            left_click_color: value.to_color(key)? => CLICKS,
            left_click_radius: non_negative(key, value.to_f64(key)?)? => CLICKS,
            right_click_color: value.to_color(key)? => CLICKS,
            right_click_radius: non_negative(key, value.to_f64(key)?)? => CLICKS,
            left_click_release_color: value.to_color(key)? => CLICKS,
            left_click_release_radius: non_negative(key, value.to_f64(key)?)? => CLICKS,
            right_click_release_color: value.to_color(key)? => CLICKS,
            right_click_release_radius: non_negative(key, value.to_f64(key)?)? => CLICKS,

            auto_recenter_enabled: value.to_bool(key)? => MOTION,
            recenter_timeout_seconds: at_most(key, non_negative(key, value.to_f64(key)?)?, MAX_SECONDS)? => MOTION,

            cursor_on_top: value.to_bool(key)? => CURSOR,
            cursor_alignment: parse_text(key, value)? => CURSOR,
            cursor_image_enabled: value.to_bool(key)? => CURSOR,
            cursor_image_path: value.to_path(key)? => CURSOR,
            cursor_image_scale: positive(key, value.to_f64(key)?)? => CURSOR,

            left_click_image_enabled: value.to_bool(key)? => CLICKS,
            left_click_image_path: value.to_path(key)? => CLICKS,
            left_click_image_scale: positive(key, value.to_f64(key)?)? => CLICKS,
            right_click_image_enabled: value.to_bool(key)? => CLICKS,
            right_click_image_path: value.to_path(key)? => CLICKS,
            right_click_image_scale: positive(key, value.to_f64(key)?)? => CLICKS,
            left_click_release_image_enabled: value.to_bool(key)? => CLICKS,
            left_click_release_image_path: value.to_path(key)? => CLICKS,
            left_click_release_image_scale: positive(key, value.to_f64(key)?)? => CLICKS,
            right_click_release_image_enabled: value.to_bool(key)? => CLICKS,
            right_click_release_image_path: value.to_path(key)? => CLICKS,
            right_click_release_image_scale: positive(key, value.to_f64(key)?)? => CLICKS,

            window_width: in_range(key, value.to_i64(key)?, 1, i64::from(u32::MAX))? => WINDOW,
            window_height: in_range(key, value.to_i64(key)?, 1, i64::from(u32::MAX))? => WINDOW,
            window_x: optional_coord(key, value)? => WINDOW,
            window_y: optional_coord(key, value)? => WINDOW,
        });

        Ok(changed)
    }

    /// Merge a batch of named settings.
    ///
    /// Each entry is applied independently; rejected entries are logged and
    /// leave their setting unchanged. Returns the groups that changed.
    pub fn apply<'a, I>(&mut self, updates: I) -> ConfigChanges
    where
        I: IntoIterator<Item = (&'a str, &'a ConfigValue)>,
    {
        let mut changes = ConfigChanges::empty();
        for (key, value) in updates {
            match self.set(key, value) {
                Ok(changed) => changes |= changed,
                Err(e) => warn!(key, error = %e, "ignoring setting"),
            }
        }
        changes
    }
}

fn optional_coord(key: &str, value: &ConfigValue) -> ConfigResult<Option<i32>> {
    if let ConfigValue::Text(s) = value {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
    }
    in_range(key, value.to_i64(key)?, i64::from(i32::MIN), i64::from(i32::MAX)).map(Some)
}

fn image_override(enabled: bool, path: Option<&PathBuf>, scale: f64) -> Option<ImageOverride> {
    if !enabled {
        return None;
    }
    path.map(|path| ImageOverride {
        path: path.clone(),
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!((config.line_lifespan - 0.66).abs() < f64::EPSILON);
        assert_eq!(config.frame_interval, 30);
        assert_eq!(config.line_style, LineStyle::SmoothFade);
        assert_eq!(config.right_click_release_color, Rgb::LIME_GREEN);
        assert_eq!(config.frame_interval(), Duration::from_millis(30));
    }

    #[test]
    fn test_set_coerces_types() {
        let mut config = Config::default();
        config.set("line_width", &ConfigValue::Int(6)).unwrap();
        assert_eq!(config.line_width, 6.0);

        config.set("frame_interval", &"16".into()).unwrap();
        assert_eq!(config.frame_interval, 16);

        config.set("auto_recenter_enabled", &"False".into()).unwrap();
        assert!(!config.auto_recenter_enabled);

        config.set("line_color", &"lime green".into()).unwrap();
        assert_eq!(config.line_color, Rgb::LIME_GREEN);
    }

    #[test]
    fn test_set_rejects_and_keeps_prior() {
        let mut config = Config::default();
        assert!(config.set("line_lifespan", &ConfigValue::Float(-1.0)).is_err());
        assert!((config.line_lifespan - 0.66).abs() < f64::EPSILON);

        assert!(config.set("line_color", &"chartreuse-ish".into()).is_err());
        assert_eq!(config.line_color, Rgb::WHITE);

        assert!(matches!(
            config.set("no_such_key", &ConfigValue::Bool(true)),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let mut config = Config::default();
        assert!(config.set("line_lifespan", &ConfigValue::Float(1e300)).is_err());
        assert!(config.set("recenter_timeout_seconds", &ConfigValue::Float(1e20)).is_err());
        assert!((config.line_lifespan - 0.66).abs() < f64::EPSILON);
        assert!((config.recenter_timeout_seconds - 2.0).abs() < f64::EPSILON);

        config.set("line_lifespan", &ConfigValue::Float(MAX_SECONDS)).unwrap();
        assert_eq!(config.lifespan(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_duration_accessors_saturate() {
        let config = Config {
            line_lifespan: 1e300,
            recenter_timeout_seconds: -3.0,
            ..Config::default()
        };
        assert_eq!(config.lifespan(), Duration::MAX);
        assert_eq!(config.recenter_timeout(), Duration::ZERO);
    }

    #[test]
    fn test_coordinate_multiplier_bounded() {
        let mut config = Config::default();
        assert!(config.set("coordinate_multiplier", &ConfigValue::Float(1e308)).is_err());
        assert_eq!(config.coordinate_multiplier, 1.0);

        config.set("coordinate_multiplier", &ConfigValue::Float(-2.5)).unwrap();
        assert_eq!(config.coordinate_multiplier, -2.5);
    }

    #[test]
    fn test_line_style_names() {
        assert_eq!("original".parse::<LineStyle>(), Ok(LineStyle::Uniform));
        assert_eq!("jagged".parse::<LineStyle>(), Ok(LineStyle::JaggedFade));
        assert_eq!("jagged_fade".parse::<LineStyle>(), Ok(LineStyle::JaggedFade));
        assert_eq!("smooth_fade".parse::<LineStyle>(), Ok(LineStyle::SmoothFade));
        assert!("wobbly".parse::<LineStyle>().is_err());
    }

    #[test]
    fn test_cursor_alignment_names() {
        assert_eq!("Top-Left".parse::<CursorAlignment>(), Ok(CursorAlignment::TopLeft));
        assert_eq!("bottom right".parse::<CursorAlignment>(), Ok(CursorAlignment::BottomRight));
        assert_eq!("Center".parse::<CursorAlignment>(), Ok(CursorAlignment::Center));
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut config = Config::default();
        let style = ConfigValue::from("jagged_fade");
        let radius = ConfigValue::Float(9.0);
        let bad = ConfigValue::from("nope");
        let changes = config.apply([
            ("line_style", &style),
            ("left_click_radius", &radius),
            ("cursor_on_top", &bad),
        ]);

        assert_eq!(changes, ConfigChanges::TRAIL | ConfigChanges::CLICKS);
        assert_eq!(config.line_style, LineStyle::JaggedFade);
        assert_eq!(config.left_click_radius, 9.0);
        assert!(config.cursor_on_top);
    }

    #[test]
    fn test_marker_table() {
        let config = Config::default();
        let m = config.marker(MouseButton::Left, ClickPhase::Pressed);
        assert_eq!((m.color, m.radius), (Rgb::RED, 5.0));
        let m = config.marker(MouseButton::Left, ClickPhase::Released);
        assert_eq!((m.color, m.radius), (Rgb::GREEN, 3.0));
        let m = config.marker(MouseButton::Right, ClickPhase::Pressed);
        assert_eq!((m.color, m.radius), (Rgb::BLUE, 5.0));
        let m = config.marker(MouseButton::Right, ClickPhase::Released);
        assert_eq!((m.color, m.radius), (Rgb::LIME_GREEN, 3.0));
        assert!(m.image.is_none());
    }

    #[test]
    fn test_image_requires_enable_and_path() {
        let mut config = Config::default();
        config.set("left_click_image_path", &"dot.png".into()).unwrap();
        assert!(config.marker(MouseButton::Left, ClickPhase::Pressed).image.is_none());

        config.set("left_click_image_enabled", &ConfigValue::Bool(true)).unwrap();
        let image = config.marker(MouseButton::Left, ClickPhase::Pressed).image.unwrap();
        assert_eq!(image.path, PathBuf::from("dot.png"));

        config.set("left_click_image_path", &"".into()).unwrap();
        assert!(config.marker(MouseButton::Left, ClickPhase::Pressed).image.is_none());
    }

    #[test]
    fn test_window_coords_optional() {
        let mut config = Config::default();
        config.set("window_x", &ConfigValue::Int(-20)).unwrap();
        assert_eq!(config.window_x, Some(-20));
        config.set("window_x", &"None".into()).unwrap();
        assert_eq!(config.window_x, None);
    }
}
