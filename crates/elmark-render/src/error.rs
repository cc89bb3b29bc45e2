//! Render error types.

use std::fmt;

use crate::component::ComponentError;

/// Component lifecycle step that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleStage {
    /// Building the instance from props.
    Construct,
    /// The pre-render hook.
    PreRender,
    /// The render call.
    Render,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Construct => "construction",
            Self::PreRender => "pre-render",
            Self::Render => "render",
        })
    }
}

/// Error that aborts a render call.
///
/// Shape mismatches in the tree never produce errors; only component code can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Component code returned an error.
    #[error("component `{name}` failed during {stage}")]
    Component {
        /// Display name of the component type.
        name: String,
        /// Lifecycle step that failed.
        stage: LifecycleStage,
        /// Error returned by the component.
        #[source]
        source: ComponentError,
    },
}
