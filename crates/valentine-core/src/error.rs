pub type SceneResult<T> = Result<T, SceneError>;

/// Setup failures. A failing scene stays statically rendered; nothing here is fatal to the page.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene `{scene}` is missing element `{node}`")]
    MissingNode { scene: &'static str, node: String },
}

impl SceneError {
    pub fn missing(scene: &'static str, node: impl Into<String>) -> Self {
        Self::MissingNode {
            scene,
            node: node.into(),
        }
    }
}
