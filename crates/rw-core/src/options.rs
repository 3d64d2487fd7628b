//! Generation options and configuration
//!
//! Options come from defaults, an rc-style config file
//! (`OPTIONS=rooms:20,anchor:center`), a JSON file, or the command line.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::{GenError, OptionsError};
use crate::geometry::{Point, Rect};

/// How a room's size is derived from the length of the edge that created it
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SizePolicy {
    /// Diameter is 80% of the distance, floored
    #[default]
    Scaled,
    /// Diameter is a third of the distance, floored
    Third,
}

impl SizePolicy {
    pub fn diameter(self, distance: u32) -> u32 {
        match self {
            SizePolicy::Scaled => (f64::from(distance) * 0.8).floor() as u32,
            SizePolicy::Third => distance / 3,
        }
    }
}

/// Where a room sits relative to its sampled anchor point
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// The anchor is the room's center cell
    #[default]
    Center,
    /// The anchor is the room's top-left cell
    TopLeft,
}

impl Anchor {
    /// Square room of side `diameter` placed around `point`
    pub fn place(self, point: Point, diameter: u32) -> Rect {
        match self {
            Anchor::Center => Rect::centered_on(point, diameter, diameter),
            Anchor::TopLeft => Rect::new(point, diameter, diameter),
        }
    }
}

/// Everything a generation pass needs besides its random source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenOptions {
    /// Canvas width
    pub width: i32,
    /// Canvas height
    pub height: i32,
    /// Number of anchor points to sample
    pub rooms: usize,
    /// Margin kept free on each side, as a percentage of that axis
    pub inset_percent: u32,
    pub size_policy: SizePolicy,
    pub anchor: Anchor,
    /// Edges whose derived diameter falls below this are skipped
    pub min_diameter: u32,
    /// Refuse connections to rooms that already have `MAX_FANOUT` neighbours.
    /// Connectivity is no longer guaranteed when this is on.
    pub enforce_fanout: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            rooms: 20,
            inset_percent: 10,
            size_policy: SizePolicy::Scaled,
            anchor: Anchor::Center,
            min_diameter: 2,
            enforce_fanout: false,
        }
    }
}

impl GenOptions {
    /// Load options from a file; `.json` files are parsed as JSON, anything
    /// else as rc-style `OPTIONS=` lines.
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        let options = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)?
        } else {
            Self::parse_config(&contents)?
        };
        Ok(options)
    }

    /// Parse options from rc-style text
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        options.apply_config(contents)?;
        Ok(options)
    }

    /// Apply rc-style text on top of the current values
    pub fn apply_config(&mut self, contents: &str) -> Result<(), OptionsError> {
        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    let opt = opt.trim();
                    if !opt.is_empty() {
                        self.parse_option(opt)?;
                    }
                }
            } else {
                return Err(OptionsError::UnknownOption(line.to_string()));
            }
        }
        Ok(())
    }

    /// Parse a single `key:value`, `flag` or `!flag` option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        let (negated, opt) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };

        let Some((key, value)) = opt.split_once(':') else {
            return match opt.to_ascii_lowercase().as_str() {
                "fanout" => {
                    self.enforce_fanout = !negated;
                    Ok(())
                }
                _ => Err(OptionsError::UnknownOption(opt.to_string())),
            };
        };

        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "width" => self.width = parse_value(&key, value)?,
            "height" => self.height = parse_value(&key, value)?,
            "rooms" => self.rooms = parse_value(&key, value)?,
            "inset" => self.inset_percent = parse_value(&key, value.trim_end_matches('%'))?,
            "size" => self.size_policy = parse_value(&key, value)?,
            "anchor" => self.anchor = parse_value(&key, value)?,
            "mindiameter" => self.min_diameter = parse_value(&key, value)?,
            "fanout" => self.enforce_fanout = parse_value::<bool>(&key, value)? != negated,
            _ => return Err(OptionsError::UnknownOption(key)),
        }
        Ok(())
    }

    /// Check the options describe a usable canvas
    pub fn validate(&self) -> Result<(), GenError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GenError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if self.rooms == 0 {
            return Err(GenError::InvalidRoomCount);
        }
        if self.inset_percent >= 50 {
            return Err(GenError::InvalidInset {
                percent: self.inset_percent,
            });
        }
        if self.min_diameter == 0 {
            return Err(GenError::InvalidMinDiameter);
        }
        Ok(())
    }

    /// Inclusive sampling bounds along x
    pub fn x_bounds(&self) -> (i32, i32) {
        inset_bounds(self.width, self.inset_percent)
    }

    /// Inclusive sampling bounds along y
    pub fn y_bounds(&self) -> (i32, i32) {
        inset_bounds(self.height, self.inset_percent)
    }

    /// Render options back to rc-style text
    pub fn to_config(&self) -> String {
        format!(
            "OPTIONS=width:{},height:{},rooms:{},inset:{},size:{},anchor:{},mindiameter:{},{}fanout\n",
            self.width,
            self.height,
            self.rooms,
            self.inset_percent,
            self.size_policy,
            self.anchor,
            self.min_diameter,
            if self.enforce_fanout { "" } else { "!" },
        )
    }
}

fn inset_bounds(extent: i32, percent: u32) -> (i32, i32) {
    let inset = (i64::from(extent) * i64::from(percent) / 100) as i32;
    (inset, extent - inset)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, OptionsError> {
    value.parse().map_err(|_| OptionsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
