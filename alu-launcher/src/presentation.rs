//! Console presentation of bootstrap failures.

use std::io::{self, BufRead, IsTerminal, Write};

/// Pause only when asked to and when someone can answer.
pub fn should_pause(no_pause: bool) -> bool {
    !no_pause && io::stdin().is_terminal()
}

/// Diagnostic shown to the user, including the cause chain.
pub fn format_failure(err: &anyhow::Error) -> String {
    format!("[ERROR] {:#}", err)
}

/// Print the diagnostic to stderr and optionally wait for Enter.
pub fn report_failure(err: &anyhow::Error, pause: bool) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "\n{}", format_failure(err));
    if pause {
        let stdin = io::stdin();
        wait_for_enter(&mut stdin.lock(), &mut out);
    }
}

fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) {
    let _ = write!(output, "Press Enter to exit...");
    let _ = output.flush();
    let mut line = String::new();
    let _ = input.read_line(&mut line);
}
