use crate::config::ConfigError;
use crate::presets::PresetError;

/// Failures that abort setup or surface to the page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is not supported by this browser")]
    Unsupported(&'static str),
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
    #[error("missing page element: {0}")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Preset(#[from] PresetError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
