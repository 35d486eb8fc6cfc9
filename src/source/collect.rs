use log::info;

use crate::graph::GraphSnapshot;

use super::command::run_graph_command;
use super::parse::parse_graph_data;
use super::{GraphSource, LoadError};

pub fn fetch_graph_data(source: &GraphSource) -> Result<GraphSnapshot, LoadError> {
    let raw = match source {
        GraphSource::File(path) => std::fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.clone(),
            source: error,
        })?,
        GraphSource::Command { program, args } => run_graph_command(program, args)?,
    };

    let snapshot = parse_graph_data(&raw)?;
    info!(
        "loaded graph snapshot from {}: {} nodes, {} edges ({} dropped)",
        source.describe(),
        snapshot.node_count(),
        snapshot.edge_count(),
        snapshot.dropped_edges()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let source = GraphSource::File(PathBuf::from("/nonexistent/doc-graph-view/graph.json"));
        assert!(matches!(
            fetch_graph_data(&source),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn reads_snapshot_from_file() {
        let path = std::env::temp_dir().join(format!(
            "doc-graph-view-collect-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"nodes": [{"id": 7, "title": "Seven"}], "edges": []}"#,
        )
        .expect("write temp graph");

        let snapshot = fetch_graph_data(&GraphSource::File(path.clone())).expect("load graph");
        let _ = std::fs::remove_file(&path);

        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.nodes()[0].title, "Seven");
    }

    #[test]
    fn unknown_program_is_a_command_error() {
        let source = GraphSource::Command {
            program: "doc-graph-view-no-such-program".to_owned(),
            args: Vec::new(),
        };
        assert!(matches!(
            fetch_graph_data(&source),
            Err(LoadError::Command(_))
        ));
    }
}
