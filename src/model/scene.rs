use glam::Vec3;

/// Opaque handle to a node owned by a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians (x = pitch, y = yaw, z = roll)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub transform: Transform,
}

/// Flat store of named transform nodes.
///
/// Nodes are only ever appended, so a `NodeId` stays valid for the lifetime
/// of the scene. Parents always have a lower index than their children.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, parent: Option<NodeId>, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            parent,
            transform,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id.0).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|n| &mut n.transform)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `root` followed by all of its descendants, depth first.
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        if root.0 >= self.nodes.len() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // push in reverse so children come out in insertion order
            let children = self.children(id);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .skip(parent.0 + 1)
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(i, _)| NodeId(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_is_depth_first_in_insertion_order() {
        let mut scene = Scene::new();
        let root = scene.add("car", None, Transform::default());
        let body = scene.add("body", Some(root), Transform::default());
        let door = scene.add("door", Some(body), Transform::default());
        let wheel = scene.add("wheel", Some(root), Transform::default());
        let other = scene.add("road", None, Transform::default());

        assert_eq!(scene.subtree(root), vec![root, body, door, wheel]);
        assert_eq!(scene.subtree(other), vec![other]);
    }

    #[test]
    fn unknown_handle_yields_nothing() {
        let mut scene = Scene::new();
        let id = scene.add("only", None, Transform::default());
        let mut other = Scene::new();
        assert!(other.transform_mut(id).is_none());
        assert!(other.subtree(id).is_empty());
        assert!(scene.node(id).is_some());
    }
}
