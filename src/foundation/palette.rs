//! Named colors shared by the vignettes.

use crate::foundation::core::Rgb8;

pub(crate) const TEAL: Rgb8 = Rgb8::new(0x4e, 0xcd, 0xc4);
pub(crate) const CORAL: Rgb8 = Rgb8::new(0xff, 0x6b, 0x6b);
pub(crate) const AMBER: Rgb8 = Rgb8::new(0xff, 0xeb, 0x3b);
pub(crate) const BLACK: Rgb8 = Rgb8::new(0x00, 0x00, 0x00);
pub(crate) const INK: Rgb8 = Rgb8::new(0x1a, 0x1a, 0x1a);
pub(crate) const CHARCOAL: Rgb8 = Rgb8::new(0x33, 0x33, 0x33);
pub(crate) const SLATE: Rgb8 = Rgb8::new(0x44, 0x44, 0x44);
pub(crate) const STONE: Rgb8 = Rgb8::new(0x55, 0x55, 0x55);
pub(crate) const ASH: Rgb8 = Rgb8::new(0x66, 0x66, 0x66);
pub(crate) const FOG: Rgb8 = Rgb8::new(0x88, 0x88, 0x88);

pub(crate) const CARD_HOLE: Rgb8 = Rgb8::new(0xc4, 0x9a, 0x6c);
pub(crate) const CARD_HOLE_EDGE: Rgb8 = Rgb8::new(0xa0, 0x78, 0x50);

pub(crate) const OXIDE: Rgb8 = Rgb8::new(0x2a, 0x4a, 0x6a);
pub(crate) const OXIDE_GLOW: Rgb8 = Rgb8::new(0x4a, 0x7a, 0x9a);
pub(crate) const GATE: Rgb8 = Rgb8::new(0x1a, 0x3a, 0x5a);
pub(crate) const GATE_CHARGED: Rgb8 = Rgb8::new(0x2a, 0x5a, 0x7a);
pub(crate) const GATE_EDGE: Rgb8 = Rgb8::new(0x4a, 0x6a, 0x8a);
