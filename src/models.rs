use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

static NEXT_DOC_ID: AtomicU64 = AtomicU64::new(1);

impl DocumentId {
    pub fn next() -> Self {
        Self(NEXT_DOC_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Zoom multiplier, restricted to the entries of the zoom menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub enum Scale {
    #[default]
    Normal,
    OneAndHalf,
    Double,
    DoubleAndHalf,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("unsupported scale {0}, expected one of 1, 1.5, 2, 2.5")]
pub struct UnsupportedScale(pub String);

impl Scale {
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::OneAndHalf,
        Self::Double,
        Self::DoubleAndHalf,
    ];

    pub const fn factor(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::OneAndHalf => 1.5,
            Self::Double => 2.0,
            Self::DoubleAndHalf => 2.5,
        }
    }

    pub const fn percent(self) -> u32 {
        match self {
            Self::Normal => 100,
            Self::OneAndHalf => 150,
            Self::Double => 200,
            Self::DoubleAndHalf => 250,
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Next larger menu entry, saturating at the largest.
    pub fn step_up(self) -> Self {
        Self::ALL[(self.position() + 1).min(Self::ALL.len() - 1)]
    }

    /// Next smaller menu entry, saturating at the smallest.
    pub fn step_down(self) -> Self {
        Self::ALL[self.position().saturating_sub(1)]
    }

    /// Menu entry closest to an arbitrary zoom factor.
    pub fn nearest(factor: f32) -> Self {
        Self::ALL
            .into_iter()
            .min_by(|a, b| {
                (a.factor() - factor)
                    .abs()
                    .total_cmp(&(b.factor() - factor).abs())
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl TryFrom<f32> for Scale {
    type Error = UnsupportedScale;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| (s.factor() - value).abs() < f32::EPSILON)
            .ok_or_else(|| UnsupportedScale(value.to_string()))
    }
}

impl From<Scale> for f32 {
    fn from(scale: Scale) -> Self {
        scale.factor()
    }
}

impl FromStr for Scale {
    type Err = UnsupportedScale;

    /// Accepts a factor (`1.5`) or a percentage (`150%`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let factor = match s.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f32>().map(|p| p / 100.0),
            None => s.parse::<f32>(),
        }
        .map_err(|_| UnsupportedScale(s.to_string()))?;
        Self::try_from(factor).map_err(|_| UnsupportedScale(s.to_string()))
    }
}

/// Accumulated clockwise rotation.
///
/// Stored as a count of quarter turns. The count wraps modulo 2^32, a
/// multiple of four, so wrapping never changes the effective orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation {
    quarter_turns: u32,
}

impl Rotation {
    pub const fn rotate_clockwise(self) -> Self {
        Self {
            quarter_turns: self.quarter_turns.wrapping_add(1),
        }
    }

    /// Total degrees turned since the viewer opened.
    pub fn degrees(self) -> u64 {
        u64::from(self.quarter_turns) * 90
    }

    /// Orientation to render with, always one of 0, 90, 180, 270.
    pub const fn effective_degrees(self) -> u16 {
        (self.quarter_turns % 4) as u16 * 90
    }

    /// Takes back the most recent clockwise turns until the orientation is
    /// `degrees` again.
    pub const fn unwound_to(self, degrees: u16) -> Self {
        let target = (degrees % 360 / 90) as u32;
        let extra = (self.quarter_turns % 4 + 4 - target) % 4;
        Self {
            quarter_turns: self.quarter_turns.wrapping_sub(extra),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppTheme {
    #[default]
    System,
    Light,
    Dark,
}

impl From<&str> for AppTheme {
    fn from(s: &str) -> Self {
        match s {
            "Light" => Self::Light,
            "Dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerSettings {
    pub theme: AppTheme,
    pub default_scale: Scale,
    /// Render width in pixels used until the window reports its size.
    pub page_width: u32,
    /// Rendered frames kept per open document.
    pub cache_size: usize,
    pub http_timeout_secs: u64,
    pub toast_timeout_secs: u64,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            theme: AppTheme::default(),
            default_scale: Scale::Normal,
            page_width: 800,
            cache_size: 16,
            http_timeout_secs: 30,
            toast_timeout_secs: 5,
        }
    }
}
