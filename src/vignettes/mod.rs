//! The five storage-era visualizations.
//!
//! Each vignette mounts only the elements it mutates; decorative scene construction belongs
//! to the page.

pub mod cloud_nodes;
pub mod hdd_platter;
pub mod magnetic_tape;
pub mod punch_card;
pub mod ssd_nand;

use crate::foundation::core::{AttrValue, ElementId, Point, Rgb8};
use crate::foundation::error::StrataResult;
use crate::lifecycle::Vignette;
use crate::surface::{Surface, SurfaceExt};

/// Fresh instances of every built-in vignette, in page order.
pub fn builtin() -> Vec<Box<dyn Vignette>> {
    vec![
        Box::new(punch_card::PunchCard::new()),
        Box::new(magnetic_tape::MagneticTape::new()),
        Box::new(hdd_platter::HddPlatter::new()),
        Box::new(ssd_nand::SsdNand::new()),
        Box::new(cloud_nodes::CloudNodes::new()),
    ]
}

/// Append the `svg` element a vignette draws into.
fn canvas(
    surface: &mut dyn Surface,
    root: ElementId,
    width: f64,
    height: f64,
) -> StrataResult<ElementId> {
    surface.create_with(
        root,
        "svg",
        &[("viewBox", format!("0 0 {width} {height}").into())],
    )
}

fn label(
    surface: &mut dyn Surface,
    parent: ElementId,
    at: Point,
    fill: Rgb8,
    text: &str,
) -> StrataResult<ElementId> {
    surface.create_with(
        parent,
        "text",
        &[
            ("x", at.x.into()),
            ("y", at.y.into()),
            ("fill", fill.into()),
            ("text", text.into()),
        ],
    )
}

fn group(surface: &mut dyn Surface, parent: ElementId, attrs: &[(&str, AttrValue)]) -> StrataResult<ElementId> {
    surface.create_with(parent, "g", attrs)
}
