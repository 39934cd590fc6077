//! Format conversion command

use super::Settings;
use crate::error::CliResult;
use crate::output::{print_status, Status};
use stackdef_interpreter::{load_file, to_string, DescriptorFormat};
use std::path::PathBuf;

/// Execute the convert command
///
/// The descriptor must pass validation before it is re-encoded.
pub fn execute(
    target: &str,
    to: DescriptorFormat,
    output: Option<PathBuf>,
    settings: &Settings,
) -> CliResult<()> {
    let model = load_file(settings.locate(target)?)?;
    let text = to_string(model.descriptor(), to)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            print_status(
                Status::Ok,
                &format!("Wrote {} as {} to {}", model.name(), to, path.display()),
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}
