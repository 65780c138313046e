use std::collections::BTreeMap;

use crate::foundation::core::{AttrValue, ElementId};
use crate::foundation::error::{StrataError, StrataResult};
use crate::surface::Surface;

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attrs: BTreeMap<String, AttrValue>,
}

/// In-memory [`Surface`] used by the headless driver and tests.
///
/// Elements are addressable by `#id` once they carry a text `id` attribute.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
    writes: u64,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Empty document with a single root element.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            Self::ROOT,
            Node {
                tag: "document".to_owned(),
                parent: None,
                children: Vec::new(),
                attrs: BTreeMap::new(),
            },
        );
        Self {
            nodes,
            next_id: 1,
            writes: 0,
        }
    }

    /// Document root.
    pub const ROOT: ElementId = ElementId(0);

    /// Document pre-populated with one `div` container per `#id` selector.
    pub fn with_containers<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let mut surface = Self::new();
        for selector in selectors {
            surface.add_container(selector);
        }
        surface
    }

    /// Append a container `div` whose `id` matches `selector` (leading `#` optional).
    pub fn add_container(&mut self, selector: &str) -> ElementId {
        let id = self.alloc(Self::ROOT, "div");
        let key = selector.strip_prefix('#').unwrap_or(selector);
        self.write(id, "id", AttrValue::Text(key.to_owned()));
        id
    }

    /// Tag name of `id`.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.tag.as_str())
    }

    /// Number of attached elements, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Total attribute writes since construction.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Serializable view of the subtree at `id`.
    pub fn dump(&self, id: ElementId) -> Option<ElementDump> {
        let node = self.nodes.get(&id)?;
        Some(ElementDump {
            id,
            tag: node.tag.clone(),
            attrs: node.attrs.clone(),
            children: node
                .children
                .iter()
                .filter_map(|c| self.dump(*c))
                .collect(),
        })
    }

    fn alloc(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                tag: tag.to_owned(),
                parent: Some(parent),
                children: Vec::new(),
                attrs: BTreeMap::new(),
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    fn write(&mut self, id: ElementId, name: &str, value: AttrValue) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attrs.insert(name.to_owned(), value);
            self.writes += 1;
        }
    }
}

impl Surface for MemorySurface {
    fn select(&self, selector: &str) -> Option<ElementId> {
        let key = selector.strip_prefix('#')?;
        self.nodes
            .iter()
            .find(|(_, n)| n.attrs.get("id").and_then(|v| v.as_text()) == Some(key))
            .map(|(id, _)| *id)
    }

    fn create(&mut self, parent: ElementId, tag: &str) -> StrataResult<ElementId> {
        if !self.nodes.contains_key(&parent) {
            return Err(StrataError::validation(format!(
                "cannot create <{tag}>: parent element {} is not attached",
                parent.0
            )));
        }
        Ok(self.alloc(parent, tag))
    }

    fn remove(&mut self, id: ElementId) {
        if id == Self::ROOT {
            return;
        }
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in node.children {
            self.remove(child);
        }
    }

    fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn attr(&self, id: ElementId, name: &str) -> Option<AttrValue> {
        self.nodes.get(&id)?.attrs.get(name).cloned()
    }

    fn attrs(&self, id: ElementId) -> Vec<(String, AttrValue)> {
        self.nodes
            .get(&id)
            .map(|n| {
                n.attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_attr(&mut self, id: ElementId, name: &str, value: AttrValue) {
        self.write(id, name, value);
    }

    fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attrs.remove(name);
        }
    }
}

/// Serializable element subtree.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ElementDump {
    /// Element handle.
    pub id: ElementId,
    /// Tag name.
    pub tag: String,
    /// Attributes by name.
    pub attrs: BTreeMap<String, AttrValue>,
    /// Child subtrees in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementDump>,
}

#[cfg(test)]
#[path = "../../tests/unit/surface/memory.rs"]
mod tests;
