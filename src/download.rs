//! Archive downloads through the host's download client

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::host::{CommandLine, Host};
use crate::ui::Reporter;

/// Download client invoked for every fetch
const DOWNLOADER: &str = "wget";

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

/// Download `url` to `dest` unless `dest` already exists
///
/// The file is fetched under a `.part` name and moved into place once the
/// download client exits successfully, so an interrupted download is never
/// mistaken for a finished one.
pub fn fetch_if_missing(
    host: &dyn Host,
    url: &str,
    dest: &Path,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let name = dest
        .file_name()
        .map_or_else(|| dest.display().to_string(), |n| n.to_string_lossy().into_owned());

    if host.exists(dest) {
        reporter.skip(&format!("{name} already downloaded"));
        return Ok(());
    }

    let partial = partial_path(dest);
    reporter.info(&format!("Downloading {name}"));
    host.run(
        &CommandLine::new(DOWNLOADER)
            .args(["-q", "-O"])
            .arg(partial.display().to_string())
            .arg(url),
    )?;
    host.rename(&partial, dest)?;
    reporter.success(&format!("Downloaded {name}"));
    Ok(())
}
