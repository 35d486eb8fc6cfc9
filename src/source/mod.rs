mod collect;
mod command;
mod parse;

use std::path::PathBuf;

pub use collect::fetch_graph_data;

/// Where the document graph snapshot comes from.
#[derive(Clone, Debug)]
pub enum GraphSource {
    File(PathBuf),
    Command { program: String, args: Vec<String> },
}

impl GraphSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Command { program, args } if args.is_empty() => program.clone(),
            Self::Command { program, args } => format!("{program} {}", args.join(" ")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read graph data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("graph data command failed: {0}")]
    Command(String),
    #[error("invalid graph data: {0}")]
    Parse(#[from] serde_json::Error),
}
