mod app;
mod graph;
mod source;
mod util;

use std::path::PathBuf;

use anyhow::{anyhow, ensure};
use clap::{ArgGroup, Parser};

use app::LayoutConfig;
use source::GraphSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["graph", "command"])))]
struct Args {
    /// JSON file holding `{ nodes, edges }` graph data.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Program that prints graph data as JSON on stdout. Arguments follow `--`.
    #[arg(long)]
    command: Option<String>,

    #[arg(last = true)]
    command_args: Vec<String>,

    /// Keep the viewer open after a document is chosen.
    #[arg(long)]
    stay_open: bool,

    #[arg(long, default_value_t = 130.0)]
    link_distance: f32,

    #[arg(long, default_value_t = -300.0, allow_hyphen_values = true)]
    charge: f32,

    #[arg(long, default_value_t = 0.05)]
    center_strength: f32,

    #[arg(long, default_value_t = 60.0)]
    collide_radius: f32,

    #[arg(long, default_value_t = 0.4)]
    velocity_decay: f32,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 820.0)]
    height: f32,
}

impl Args {
    fn source(&self) -> anyhow::Result<GraphSource> {
        match (&self.graph, &self.command) {
            (Some(path), None) => {
                ensure!(
                    self.command_args.is_empty(),
                    "arguments after `--` are only accepted with --command"
                );
                Ok(GraphSource::File(path.clone()))
            }
            (None, Some(program)) => Ok(GraphSource::Command {
                program: program.clone(),
                args: self.command_args.clone(),
            }),
            _ => Err(anyhow!("exactly one of --graph or --command is required")),
        }
    }

    fn layout_config(&self) -> anyhow::Result<LayoutConfig> {
        ensure!(self.link_distance > 0.0, "--link-distance must be positive");
        ensure!(self.collide_radius >= 0.0, "--collide-radius must not be negative");
        ensure!(
            (0.0..=1.0).contains(&self.velocity_decay),
            "--velocity-decay must be between 0 and 1"
        );
        ensure!(
            self.width >= 1.0 && self.height >= 1.0,
            "--width and --height must be at least 1"
        );

        Ok(LayoutConfig {
            link_distance: self.link_distance,
            charge_strength: self.charge,
            center_strength: self.center_strength,
            collide_radius: self.collide_radius,
            velocity_decay: self.velocity_decay,
            ..LayoutConfig::default()
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let source = args.source()?;
    let config = args.layout_config()?;
    let stay_open = args.stay_open;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Document graph")
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "doc-graph-view",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GraphViewApp::new(
                cc,
                source.clone(),
                config,
                stay_open,
            )))
        }),
    )
    .map_err(|error| anyhow!("graph viewer exited with an error: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_source_collects_trailing_arguments() {
        let args = Args::try_parse_from([
            "doc-graph-view",
            "--command",
            "notes",
            "--",
            "graph",
            "--json",
        ])
        .unwrap();

        match args.source().unwrap() {
            GraphSource::Command { program, args } => {
                assert_eq!(program, "notes");
                assert_eq!(args, ["graph", "--json"]);
            }
            other => panic!("unexpected source {other:?}"),
        }
    }

    #[test]
    fn one_input_is_required() {
        assert!(Args::try_parse_from(["doc-graph-view"]).is_err());
        assert!(
            Args::try_parse_from(["doc-graph-view", "--graph", "a.json", "--command", "notes"])
                .is_err()
        );
    }

    #[test]
    fn layout_flags_override_defaults() {
        let args = Args::try_parse_from([
            "doc-graph-view",
            "--graph",
            "a.json",
            "--charge",
            "-120",
            "--link-distance",
            "80",
        ])
        .unwrap();
        let config = args.layout_config().unwrap();

        assert_eq!(config.charge_strength, -120.0);
        assert_eq!(config.link_distance, 80.0);
        assert_eq!(config.velocity_decay, LayoutConfig::default().velocity_decay);
    }

    #[test]
    fn out_of_range_decay_is_rejected() {
        let args =
            Args::try_parse_from(["doc-graph-view", "--graph", "a.json", "--velocity-decay", "2"])
                .unwrap();
        assert!(args.layout_config().is_err());
    }
}
