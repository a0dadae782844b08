//! Tree diffing.
//!
//! Paths are child indices from the root; the root itself is the empty path.

use super::node::{Element, Node};
use thiserror::Error;

/// Child-index path from the root
pub type Path = Vec<usize>;

/// One change between two trees
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch {
    /// Replace the node at `path`
    Replace {
        /// Target node
        path: Path,
        /// Replacement
        node: Node,
    },
    /// Set or change an attribute and move it to `index`
    SetAttribute {
        /// Target element
        path: Path,
        /// Position in the element's attribute list
        index: usize,
        /// Attribute name
        name: String,
        /// New value
        value: String,
    },
    /// Remove an attribute
    RemoveAttribute {
        /// Target element
        path: Path,
        /// Attribute name
        name: String,
    },
    /// Change the contents of a text node
    SetText {
        /// Target text node
        path: Path,
        /// New text
        text: String,
    },
    /// Append a child to an element
    AppendChild {
        /// Parent element
        path: Path,
        /// New child
        node: Node,
    },
    /// Drop children past `len`
    TruncateChildren {
        /// Parent element
        path: Path,
        /// Children to keep
        len: usize,
    },
}

impl Patch {
    /// Path the patch applies to
    #[must_use]
    pub fn path(&self) -> &[usize] {
        match self {
            Self::Replace { path, .. }
            | Self::SetAttribute { path, .. }
            | Self::RemoveAttribute { path, .. }
            | Self::SetText { path, .. }
            | Self::AppendChild { path, .. }
            | Self::TruncateChildren { path, .. } => path,
        }
    }
}

/// A patch did not fit the tree it was applied to
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// No node at this path
    #[error("No node at path {0:?}")]
    MissingNode(Path),
    /// The node at this path is the wrong kind for the patch
    #[error("Node at path {0:?} has the wrong kind for this patch")]
    WrongKind(Path),
}

/// Patches turning `old` into `new`
///
/// Elements with the same tag are patched in place; children are compared
/// by position, so lists that only grow or shrink at the end produce
/// append/truncate patches. Applying the result to `old` yields a tree equal
/// to `new`, attribute order included.
#[must_use]
pub fn diff(old: &Node, new: &Node) -> Vec<Patch> {
    let mut patches = Vec::new();
    diff_node(old, new, &mut Vec::new(), &mut patches);
    patches
}

fn diff_node(old: &Node, new: &Node, path: &mut Path, out: &mut Vec<Patch>) {
    match (old, new) {
        (Node::Text(a), Node::Text(b)) => {
            if a != b {
                out.push(Patch::SetText {
                    path: path.clone(),
                    text: b.clone(),
                });
            }
        },
        (Node::Element(a), Node::Element(b)) if a.tag == b.tag => diff_element(a, b, path, out),
        _ => out.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_element(old: &Element, new: &Element, path: &mut Path, out: &mut Vec<Patch>) {
    // Attributes as they stand after the patches emitted so far
    let mut current = Element::new(old.tag.as_str());
    for (name, value) in &old.attributes {
        if new.has_attribute(name) {
            current.attributes.push((name.clone(), value.clone()));
        } else {
            out.push(Patch::RemoveAttribute {
                path: path.clone(),
                name: name.clone(),
            });
        }
    }
    for (index, (name, value)) in new.attributes.iter().enumerate() {
        if current.attributes.get(index).is_some_and(|(n, v)| n == name && v == value) {
            continue;
        }
        current.insert_attribute(index, name.clone(), value.clone());
        out.push(Patch::SetAttribute {
            path: path.clone(),
            index,
            name: name.clone(),
            value: value.clone(),
        });
    }

    for (index, (a, b)) in old.children.iter().zip(&new.children).enumerate() {
        path.push(index);
        diff_node(a, b, path, out);
        path.pop();
    }

    if new.children.len() > old.children.len() {
        for child in &new.children[old.children.len()..] {
            out.push(Patch::AppendChild {
                path: path.clone(),
                node: child.clone(),
            });
        }
    } else if new.children.len() < old.children.len() {
        out.push(Patch::TruncateChildren {
            path: path.clone(),
            len: new.children.len(),
        });
    }
}

/// Applies `patches` to `root` in order
///
/// # Errors
///
/// Returns [`PatchError`] if a patch path does not exist or points at the
/// wrong kind of node. Patches before the failing one stay applied.
pub fn apply(root: &mut Node, patches: &[Patch]) -> Result<(), PatchError> {
    for patch in patches {
        let target = node_at(root, patch.path())?;
        match patch {
            Patch::Replace { node, .. } => *target = node.clone(),
            Patch::SetText { path, text } => match target {
                Node::Text(current) => current.clone_from(text),
                Node::Element(_) => return Err(PatchError::WrongKind(path.clone())),
            },
            Patch::SetAttribute {
                path,
                index,
                name,
                value,
            } => element_mut(target, path)?.insert_attribute(*index, name.clone(), value.clone()),
            Patch::RemoveAttribute { path, name } => element_mut(target, path)?.remove_attribute(name),
            Patch::AppendChild { path, node } => element_mut(target, path)?.children.push(node.clone()),
            Patch::TruncateChildren { path, len } => element_mut(target, path)?.children.truncate(*len),
        }
    }
    Ok(())
}

fn node_at<'a>(root: &'a mut Node, path: &[usize]) -> Result<&'a mut Node, PatchError> {
    let mut node = root;
    for (depth, &index) in path.iter().enumerate() {
        node = match node {
            Node::Element(element) => element
                .children
                .get_mut(index)
                .ok_or_else(|| PatchError::MissingNode(path[..=depth].to_vec()))?,
            Node::Text(_) => return Err(PatchError::MissingNode(path[..=depth].to_vec())),
        };
    }
    Ok(node)
}

fn element_mut<'a>(node: &'a mut Node, path: &Path) -> Result<&'a mut Element, PatchError> {
    match node {
        Node::Element(element) => Ok(element),
        Node::Text(_) => Err(PatchError::WrongKind(path.clone())),
    }
}
