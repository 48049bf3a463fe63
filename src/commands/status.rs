//! Status command implementation

use std::path::Path;

use crate::cli::StatusArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::host::SystemHost;
use crate::operations::status::{self, StatusOptions};
use crate::ui::display;

/// Run status command
pub fn run(config: Option<&Path>, verbose: bool, args: &StatusArgs) -> Result<()> {
    let settings = Settings::load(config)?;
    let options = StatusOptions::from(args);
    let report = status::gather(&settings, &SystemHost::new(verbose))?;
    display::display_status(&report, options.json)
}
