use thiserror::Error;
use weft_anim::AnimError;

use crate::hooks::Phase;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render hint requires a new root but none was scheduled")]
    MissingRoot,

    #[error(transparent)]
    Anim(#[from] AnimError),

    #[error("{phase} hook failed: {source}")]
    Hook {
        phase: Phase,
        #[source]
        source: anyhow::Error,
    },
}

impl RenderError {
    /// Wrap a hook failure, unwrapping errors the pipeline itself raised.
    pub(crate) fn hook(phase: Phase, source: anyhow::Error) -> Self {
        match source.downcast::<RenderError>() {
            Ok(err) => err,
            Err(source) => RenderError::Hook { phase, source },
        }
    }
}
