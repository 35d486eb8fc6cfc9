use std::process::Command;

use super::LoadError;

pub(super) fn run_graph_command(program: &str, args: &[String]) -> Result<String, LoadError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|error| LoadError::Command(format!("failed to spawn {program}: {error}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LoadError::Command(format!(
            "{program} exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| LoadError::Command(format!("{program} output was not valid UTF-8")))
}
