use std::collections::BTreeMap;

use crate::foundation::core::{AttrValue, ElementId};
use crate::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
struct NodeState {
    attrs: Vec<(String, AttrValue)>,
}

/// Attribute and membership record of one element subtree.
///
/// Captured right after a vignette is bound; restoring it undoes every attribute write and
/// removes every element appended since.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceSnapshot {
    root: ElementId,
    nodes: BTreeMap<ElementId, NodeState>,
}

impl SurfaceSnapshot {
    /// Record the subtree rooted at `root`.
    pub fn capture(surface: &dyn Surface, root: ElementId) -> Self {
        let mut nodes = BTreeMap::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !surface.contains(id) {
                continue;
            }
            nodes.insert(
                id,
                NodeState {
                    attrs: surface.attrs(id),
                },
            );
            stack.extend(surface.children(id));
        }
        Self { root, nodes }
    }

    /// Root of the recorded subtree.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of recorded elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the root was not attached at capture time.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Put the subtree back exactly as captured.
    pub fn restore(&self, surface: &mut dyn Surface) {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(state) = self.nodes.get(&id) else {
                continue;
            };
            for child in surface.children(id) {
                if self.nodes.contains_key(&child) {
                    stack.push(child);
                } else {
                    surface.remove(child);
                }
            }
            for (name, _) in surface.attrs(id) {
                if !state.attrs.iter().any(|(n, _)| *n == name) {
                    surface.remove_attr(id, &name);
                }
            }
            for (name, value) in &state.attrs {
                if surface.attr(id, name).as_ref() != Some(value) {
                    surface.set_attr(id, name, value.clone());
                }
            }
        }
    }

    /// Human-readable list of everything that differs from the capture (empty when identical).
    pub fn differences(&self, surface: &dyn Surface) -> Vec<String> {
        let now = Self::capture(surface, self.root);
        let mut out = Vec::new();
        for (id, state) in &self.nodes {
            let Some(current) = now.nodes.get(id) else {
                out.push(format!("element {} was removed", id.0));
                continue;
            };
            if current != state {
                for (name, value) in &state.attrs {
                    let found = current.attrs.iter().find(|(n, _)| n == name);
                    match found {
                        Some((_, v)) if v == value => {}
                        Some((_, v)) => {
                            out.push(format!("element {} {name}: {value:?} -> {v:?}", id.0))
                        }
                        None => out.push(format!("element {} lost {name}", id.0)),
                    }
                }
                for (name, _) in &current.attrs {
                    if !state.attrs.iter().any(|(n, _)| n == name) {
                        out.push(format!("element {} gained {name}", id.0));
                    }
                }
            }
        }
        for id in now.nodes.keys() {
            if !self.nodes.contains_key(id) {
                out.push(format!("element {} was added", id.0));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/snapshot.rs"]
mod tests;
