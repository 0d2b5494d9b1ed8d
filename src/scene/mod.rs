//! Boundary with the external model loader.
//!
//! The loaded eye model is treated as an opaque, flat list of named
//! nodes. The viewer only ever looks nodes up by exact name (e.g. the
//! lens mesh) to swap their material.

mod material;

pub use material::Material;

// ---------------------------------------------------------------------------
// Scene graph
// ---------------------------------------------------------------------------

/// One named mesh in the loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name as authored in the asset.
    pub name: String,
    /// Currently applied material, if the node is a mesh.
    pub material: Option<Material>,
}

impl SceneNode {
    /// Mesh node with no material assigned yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            material: None,
        }
    }
}

/// Flat node list in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of material-less nodes with the given names.
    #[must_use]
    pub fn from_node_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: names.into_iter().map(SceneNode::new).collect(),
        }
    }

    /// Append a node.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// First node with exactly this name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Assign `material` to every node named `name`. Returns how many
    /// nodes matched.
    pub fn set_material(&mut self, name: &str, material: Material) -> usize {
        let mut count = 0;
        for node in self.nodes.iter_mut().filter(|n| n.name == name) {
            node.material = Some(material);
            count += 1;
        }
        count
    }

    /// All nodes in traversal order.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Model load state
// ---------------------------------------------------------------------------

/// Progress of the asynchronous model load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelState {
    /// Load in flight; the host shows a placeholder.
    #[default]
    Loading,
    /// Model available.
    Ready(SceneGraph),
    /// The loader reported a failure.
    Failed(String),
}

impl ModelState {
    /// Whether the model is available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The loaded scene, if ready.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneGraph> {
        match self {
            Self::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    /// Mutable access to the loaded scene, if ready.
    pub fn scene_mut(&mut self) -> Option<&mut SceneGraph> {
        match self {
            Self::Ready(scene) => Some(scene),
            _ => None,
        }
    }

    /// Failure message, if the load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_material_matches_exact_name_only() {
        let mut scene =
            SceneGraph::from_node_names(["Lens_Lens_0", "Lens_Lens_0_1", "Iris"]);
        assert_eq!(scene.set_material("Lens_Lens_0", Material::CLEAR_LENS), 1);
        assert_eq!(
            scene.find("Lens_Lens_0").unwrap().material,
            Some(Material::CLEAR_LENS)
        );
        assert_eq!(scene.find("Lens_Lens_0_1").unwrap().material, None);
        assert_eq!(scene.set_material("lens", Material::CLEAR_LENS), 0);
    }

    #[test]
    fn test_model_state_accessors() {
        let mut state = ModelState::default();
        assert!(!state.is_ready());
        assert!(state.scene_mut().is_none());

        state = ModelState::Failed("404".into());
        assert_eq!(state.error(), Some("404"));

        state = ModelState::Ready(SceneGraph::new());
        assert!(state.is_ready());
        assert!(state.scene().unwrap().is_empty());
    }
}
