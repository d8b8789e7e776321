//! Reflow command handler

use anyhow::Result;

use dexforge::annotate;

use crate::cli::ScriptArg;
use crate::file_utils::read_input;

/// Handle the reflow command; each input line is annotated on its own
pub fn handle(text: Option<String>, script: ScriptArg) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => read_input(None)?,
    };
    println!("{}", reflow_lines(&text, script));
    Ok(())
}

fn reflow_lines(text: &str, script: ScriptArg) -> String {
    text.lines()
        .map(|line| annotate(line, script.resolve(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_lines_detects_per_line() {
        let text = "用电击攻击对手。有时会让对手陷入麻痹状态。\nMay paralyze.Rarely burns.";
        assert_eq!(
            reflow_lines(text, ScriptArg::Auto),
            "用电击攻击 对手。 有时会让对手 陷入麻痹状态。\nMay paralyze.  Rarely burns."
        );
    }

    #[test]
    fn test_reflow_forced_script() {
        assert_eq!(reflow_lines("A,b", ScriptArg::Latin), "A,  b");
        assert_eq!(reflow_lines("A,b", ScriptArg::Cjk), "A,b");
    }
}
