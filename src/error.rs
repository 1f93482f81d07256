use std::fmt;

/// Which half of the program failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Setup-time failure of the shader pipeline. Not recoverable.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A shader module did not compile. `log` holds the driver diagnostics.
    ShaderCompilation { stage: ShaderStage, log: String },
    /// The compiled modules could not be linked into a render pipeline.
    ProgramLink { log: String },
    /// No embedded shader is registered under this identifier.
    UnknownShader(String),
}

impl PipelineError {
    /// The diagnostic text reported by the driver, if any.
    pub fn log(&self) -> Option<&str> {
        match self {
            PipelineError::ShaderCompilation { log, .. } | PipelineError::ProgramLink { log } => {
                Some(log.as_str())
            }
            PipelineError::UnknownShader(_) => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ShaderCompilation { stage, log } => {
                write!(f, "{} shader failed to compile:\n{}", stage, log)
            }
            PipelineError::ProgramLink { log } => write!(f, "program failed to link:\n{}", log),
            PipelineError::UnknownShader(id) => write!(f, "no shader source named `{}`", id),
        }
    }
}

impl std::error::Error for PipelineError {}
