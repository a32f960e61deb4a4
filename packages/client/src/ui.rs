//! Terminal output helpers.

use std::io::Write;

/// Prompt shown by the line editor
pub fn prompt(username: &str) -> String {
    format!("{}> ", username)
}

/// Print a block of output and redisplay the prompt under it
pub fn print_above_prompt(output: &str, username: &str) {
    print!("\r{}\n{}", output, prompt(username));
    std::io::stdout().flush().ok();
}
