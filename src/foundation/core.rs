use std::fmt;

pub use kurbo::{Affine, Line, Point, Vec2};

/// Opaque handle to one element on a rendering surface.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Identifier correlating a scroll section with its vignette.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct EraKey(String);

impl EraKey {
    /// Wrap an era name (`"punch"`, `"tape"`, ...).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EraKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::borrow::Borrow<str> for EraKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EraKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scroll direction reported by the scroll-trigger collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Page scrolling towards later sections.
    Down,
    /// Page scrolling towards earlier sections.
    Up,
}

/// Straight (non-premultiplied) RGB8 color, the form SVG fill/stroke attributes take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Value of one mutable element attribute.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Numeric attribute (`opacity`, `r`, `x`, `stroke-width`, ...).
    Number(f64),
    /// Paint attribute (`fill`, `stroke`).
    Color(Rgb8),
    /// Free text (`text` content, `filter` reference).
    Text(String),
    /// 2D transform; identity means "no transform".
    Transform(Affine),
}

impl AttrValue {
    /// Numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Color payload, if any.
    pub fn as_color(&self) -> Option<Rgb8> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Transform payload, if any.
    pub fn as_transform(&self) -> Option<Affine> {
        match self {
            Self::Transform(a) => Some(*a),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Rgb8> for AttrValue {
    fn from(value: Rgb8) -> Self {
        Self::Color(value)
    }
}

impl From<Affine> for AttrValue {
    fn from(value: Affine) -> Self {
        Self::Transform(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
