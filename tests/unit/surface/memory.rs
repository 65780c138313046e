use super::*;
use crate::surface::SurfaceExt;

#[test]
fn containers_are_selectable_by_id() {
    let surface = MemorySurface::with_containers(["#viz-punch", "#viz-tape"]);
    let punch = surface.select("#viz-punch").unwrap();
    let tape = surface.select("#viz-tape").unwrap();
    assert_ne!(punch, tape);
    assert_eq!(surface.tag(punch), Some("div"));
    assert_eq!(surface.select("#viz-hdd"), None);
    assert_eq!(surface.select("viz-punch"), None);
}

#[test]
fn remove_detaches_whole_subtree() {
    let mut surface = MemorySurface::with_containers(["#c"]);
    let c = surface.select("#c").unwrap();
    let g = surface.create(c, "g").unwrap();
    let r = surface.create(g, "rect").unwrap();
    assert_eq!(surface.children(c), vec![g]);

    surface.remove(g);
    assert!(!surface.contains(g));
    assert!(!surface.contains(r));
    assert!(surface.children(c).is_empty());

    surface.remove(MemorySurface::ROOT);
    assert!(surface.contains(MemorySurface::ROOT));
}

#[test]
fn create_under_missing_parent_fails() {
    let mut surface = MemorySurface::new();
    assert!(surface.create(ElementId(99), "rect").is_err());
}

#[test]
fn attributes_round_trip_and_count_writes() {
    let mut surface = MemorySurface::with_containers(["#c"]);
    let c = surface.select("#c").unwrap();
    let before = surface.write_count();
    let t = surface
        .create_with(c, "text", &[("opacity", AttrValue::Number(0.0))])
        .unwrap();
    surface.set_text(t, "Bytes: 0");
    assert_eq!(surface.text(t).as_deref(), Some("Bytes: 0"));
    assert_eq!(surface.number(t, "opacity"), Some(0.0));
    assert_eq!(surface.write_count(), before + 2);

    surface.remove_attr(t, "opacity");
    assert_eq!(surface.attr(t, "opacity"), None);
    let names: Vec<String> = surface.attrs(t).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["text".to_owned()]);
}

#[test]
fn dump_nests_children() {
    let mut surface = MemorySurface::with_containers(["#c"]);
    let c = surface.select("#c").unwrap();
    surface.create(c, "circle").unwrap();
    let dump = surface.dump(c).unwrap();
    assert_eq!(dump.children.len(), 1);
    assert_eq!(dump.children[0].tag, "circle");
    let json = serde_json::to_value(&dump).unwrap();
    assert_eq!(json["attrs"]["id"], "c");
}
