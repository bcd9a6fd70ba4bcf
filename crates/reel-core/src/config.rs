#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! A [`CarouselConfig`] is immutable for the lifetime of one engine
//! instance. Changing any part of it means tearing the engine down and
//! building a new one; the controller compares configs with `PartialEq` to
//! decide.
//!
//! Engine options are opaque to the carousel layer except for `axis`, which
//! is always forced from the orientation before the engine sees it.

use std::collections::BTreeMap;

/// Direction in which slides are laid out and navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Slides flow left to right.
    #[default]
    Horizontal,
    /// Slides flow top to bottom.
    Vertical,
}

impl Orientation {
    /// The engine scroll axis for this orientation.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::X,
            Self::Vertical => Axis::Y,
        }
    }

    /// Lowercase name as used in markup and config documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::str::FromStr for Orientation {
    type Err = crate::CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(crate::CarouselError::InvalidConfig(format!(
                "unknown orientation {other:?}"
            ))),
        }
    }
}

/// Engine scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Opaque option value passed through to the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Options handed to the scroll engine at construction.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineOptions {
    /// Scroll axis. Overridden by [`CarouselConfig::engine_options`].
    pub axis: Axis,
    /// Wrap from the last snap to the first and back.
    #[cfg_attr(feature = "serde", serde(rename = "loop"))]
    pub loop_around: bool,
    /// Snap selected on init.
    pub start_index: usize,
    /// Free scrolling without snapping while dragging.
    pub drag_free: bool,
    /// Everything else, passed through untouched.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub extra: BTreeMap<String, OptionValue>,
}

impl EngineOptions {
    /// Enable or disable wraparound.
    #[must_use]
    pub fn loop_around(mut self, enabled: bool) -> Self {
        self.loop_around = enabled;
        self
    }

    /// Set the snap selected on init.
    #[must_use]
    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    /// Set the axis. Only meaningful for [`CarouselConfig::from_options`].
    #[must_use]
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Add an opaque engine option.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Opaque engine plugin descriptor (autoplay, class names, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PluginSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: BTreeMap<String, OptionValue>,
}

impl PluginSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Configuration for one carousel instance.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    pub orientation: Orientation,
    #[cfg_attr(feature = "serde", serde(rename = "opts"))]
    pub options: EngineOptions,
    pub plugins: Vec<PluginSpec>,
}

impl CarouselConfig {
    /// Create a config with default engine options.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            options: EngineOptions::default(),
            plugins: Vec::new(),
        }
    }

    /// Build a config whose orientation follows the axis of `options`.
    ///
    /// Used when the page supplies engine options but no orientation.
    #[must_use]
    pub fn from_options(options: EngineOptions) -> Self {
        let orientation = match options.axis {
            Axis::Y => Orientation::Vertical,
            Axis::X => Orientation::Horizontal,
        };
        Self {
            orientation,
            options,
            plugins: Vec::new(),
        }
    }

    /// Replace the engine options.
    #[must_use]
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Append a plugin.
    #[must_use]
    pub fn plugin(mut self, plugin: PluginSpec) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Options as the engine must see them: `axis` always matches the
    /// orientation, whatever the caller put there.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        let axis = self.orientation.axis();
        #[cfg(feature = "tracing")]
        if self.options.axis != axis {
            tracing::debug!(
                message = "config.axis_override",
                requested = ?self.options.axis,
                orientation = self.orientation.as_str()
            );
        }
        EngineOptions {
            axis,
            ..self.options.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_options_force_axis_from_orientation() {
        let config = CarouselConfig::new(Orientation::Vertical)
            .options(EngineOptions::default().axis(Axis::X).loop_around(true));
        let opts = config.engine_options();
        assert_eq!(opts.axis, Axis::Y);
        assert!(opts.loop_around);
        // The stored options are left alone.
        assert_eq!(config.options.axis, Axis::X);
    }

    #[test]
    fn orientation_follows_axis_when_derived() {
        let vertical = CarouselConfig::from_options(EngineOptions::default().axis(Axis::Y));
        assert_eq!(vertical.orientation, Orientation::Vertical);
        let horizontal = CarouselConfig::from_options(EngineOptions::default());
        assert_eq!(horizontal.orientation, Orientation::Horizontal);
    }

    #[test]
    fn orientation_parses() {
        assert_eq!("vertical".parse::<Orientation>().ok(), Some(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
        assert_eq!(Orientation::Horizontal.as_str(), "horizontal");
    }

    #[test]
    fn plugins_participate_in_equality() {
        let a = CarouselConfig::new(Orientation::Horizontal);
        let b = a.clone().plugin(PluginSpec::new("autoplay").option("delay", OptionValue::Int(4000)));
        assert_ne!(a, b);
        assert_eq!(b.clone(), b);
    }
}
