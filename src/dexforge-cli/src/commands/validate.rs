//! Validate command handler

use anyhow::{bail, Result};
use std::path::Path;

use dexforge::{validate_move_source, Validation};

use crate::file_utils::read_input;

/// Handle the validate command
pub fn handle(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    let validation = validate_move_source(&text);
    print!("{}", report(&validation));

    if !validation.is_valid() {
        bail!("{} error(s) found", validation.errors.len());
    }
    Ok(())
}

fn report(validation: &Validation) -> String {
    let mut out = String::new();
    for error in &validation.errors {
        out.push_str(&format!("error: {}\n", error));
    }
    for warning in &validation.warnings {
        out.push_str(&format!("warning: {}\n", warning));
    }
    if validation.is_valid() {
        out.push_str("OK\n");
    }
    out
}
