use super::*;
use crate::foundation::core::Rgb8;
use crate::surface::SurfaceExt;
use crate::surface::memory::MemorySurface;

fn scene() -> (MemorySurface, ElementId, ElementId) {
    let mut surface = MemorySurface::with_containers(["#viz"]);
    let root = surface.select("#viz").unwrap();
    let dot = surface
        .create_with(
            root,
            "circle",
            &[
                ("r", AttrValue::Number(4.0)),
                ("fill", AttrValue::Color(Rgb8::new(0x4e, 0xcd, 0xc4))),
            ],
        )
        .unwrap();
    (surface, root, dot)
}

#[test]
fn restore_reverts_writes_and_removes_additions() {
    let (mut surface, root, dot) = scene();
    let snap = SurfaceSnapshot::capture(&surface, root);
    assert!(snap.differences(&surface).is_empty());

    surface.set_attr(dot, "r", AttrValue::Number(6.0));
    surface.set_attr(dot, "filter", AttrValue::from("url(#glow)"));
    surface.remove_attr(dot, "fill");
    let extra = surface.create(root, "rect").unwrap();
    surface.create(extra, "text").unwrap();
    assert_eq!(snap.differences(&surface).len(), 5);

    snap.restore(&mut surface);
    assert!(snap.differences(&surface).is_empty());
    assert!(!surface.contains(extra));
    assert_eq!(surface.number(dot, "r"), Some(4.0));
    assert_eq!(surface.attr(dot, "filter"), None);
}

#[test]
fn restore_is_idempotent() {
    let (mut surface, root, dot) = scene();
    let snap = SurfaceSnapshot::capture(&surface, root);
    surface.set_attr(dot, "r", AttrValue::Number(1.0));
    snap.restore(&mut surface);
    let writes = surface.write_count();
    snap.restore(&mut surface);
    assert_eq!(surface.write_count(), writes);
}

#[test]
fn capture_covers_nested_elements() {
    let (mut surface, root, _dot) = scene();
    let g = surface.create(root, "g").unwrap();
    surface.create(g, "rect").unwrap();
    let snap = SurfaceSnapshot::capture(&surface, root);
    assert_eq!(snap.len(), 4);
    assert_eq!(snap.root(), root);
}
