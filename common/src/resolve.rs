use std::{
    env,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{ReportError, ReportResult};

/// Directory the running executable lives in, the fallback location for inputs.
pub fn executable_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Finds `name` in `work_dir` first, then in `fallback_dir`.
pub fn resolve_input(
    name: &str,
    work_dir: &Path,
    fallback_dir: Option<&Path>,
) -> ReportResult<PathBuf> {
    let mut searched = vec![work_dir.join(name)];
    if let Some(dir) = fallback_dir {
        searched.push(dir.join(name));
    }

    match searched.iter().find(|p| p.is_file()) {
        Some(path) => {
            debug!("Resolved {name} to {}", path.display());
            Ok(path.clone())
        }
        None => Err(ReportError::MissingInput {
            name: name.to_owned(),
            searched,
        }),
    }
}
