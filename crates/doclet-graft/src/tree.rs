//! Output tree.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Every node owns a
//! payload produced by a hook and an ordered list of named slots, each slot
//! holding child ids in insertion order. Slots are created on first insert.

use doclet_core::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Handle of a node in an [`OutputTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Value returned by a hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformed {
    /// Payload stored on the new node.
    pub value: Value,
    /// Slot override. When set, it replaces the dispatcher's default slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

impl Transformed {
    pub fn new(value: Value) -> Self {
        Self { value, slot: None }
    }

    /// Declares the slot this value attaches to.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    children: Vec<NodeId>,
}

/// A node of the output tree.
#[derive(Debug, Clone)]
pub struct OutputNode {
    pub value: Value,
    slots: Vec<Slot>,
}

impl OutputNode {
    fn new(value: Value) -> Self {
        Self {
            value,
            slots: Vec::new(),
        }
    }

    /// Child ids under `slot`, empty if the slot does not exist.
    pub fn children(&self, slot: &str) -> &[NodeId] {
        self.slots
            .iter()
            .find(|s| s.name == slot)
            .map(|s| s.children.as_slice())
            .unwrap_or_default()
    }

    /// Slot names in creation order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    fn slot_mut(&mut self, name: &str) -> &mut Vec<NodeId> {
        let position = match self.slots.iter().position(|s| s.name == name) {
            Some(position) => position,
            None => {
                self.slots.push(Slot {
                    name: name.to_string(),
                    children: Vec::new(),
                });
                self.slots.len() - 1
            }
        };
        &mut self.slots[position].children
    }
}

/// The nested result of a run.
#[derive(Debug, Clone)]
pub struct OutputTree {
    nodes: Vec<OutputNode>,
}

impl Default for OutputTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTree {
    /// Creates a tree holding only an empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![OutputNode::new(Value::Object(Map::new()))],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&OutputNode> {
        self.nodes.get(id.0)
    }

    /// Payloads of the children of `parent` under `slot`.
    pub fn children(&self, parent: NodeId, slot: &str) -> Vec<&Value> {
        self.get(parent)
            .map(|node| {
                node.children(slot)
                    .iter()
                    .filter_map(|id| self.get(*id))
                    .map(|child| &child.value)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing was attached to the root.
    pub fn is_empty(&self) -> bool {
        !self.nodes[0].has_slots()
    }

    /// Attaches `child` to `parent`.
    ///
    /// Absent children are ignored. The child's own slot wins over
    /// `default_slot`; if neither yields a non-empty name the attach fails.
    /// Returns the id of the new node.
    pub fn attach(
        &mut self,
        parent: NodeId,
        child: Option<Transformed>,
        default_slot: Option<&str>,
    ) -> Result<Option<NodeId>, ConfigError> {
        let Some(child) = child else {
            return Ok(None);
        };

        let slot = match child.slot.as_deref().or(default_slot) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ConfigError::EmptySlot(describe(&child.value))),
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(OutputNode::new(child.value));
        self.nodes[parent.0].slot_mut(&slot).push(id);
        Ok(Some(id))
    }

    /// Renders the tree as JSON.
    ///
    /// Object payloads keep their fields and gain one array per slot.
    /// Other payloads are placed under `value`.
    pub fn to_json(&self) -> Value {
        self.render(self.root())
    }

    fn render(&self, id: NodeId) -> Value {
        let node = &self.nodes[id.0];
        let mut out = match &node.value {
            Value::Object(fields) => fields.clone(),
            Value::Null => Map::new(),
            other => {
                let mut wrapped = Map::new();
                wrapped.insert("value".to_string(), other.clone());
                wrapped
            }
        };
        for slot in &node.slots {
            let children = slot.children.iter().map(|c| self.render(*c)).collect();
            out.insert(slot.name.clone(), Value::Array(children));
        }
        Value::Object(out)
    }
}

fn describe(value: &Value) -> String {
    value
        .get("longname")
        .or_else(|| value.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("<node>")
        .to_string()
}
