use std::io::{BufRead, Write};

use promptframe_io::engine::RemovalConfirmer;
use promptframe_io::registry::{SectionKey, removal_prompt};

/// Asks on `output` and reads a `y`/`yes` answer from `input`.
///
/// End of input, a read error, or a prompt that could not be written all
/// count as "no".
pub struct PromptConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> RemovalConfirmer for PromptConfirmer<R, W> {
    fn confirm_removal(&mut self, section_key: &SectionKey) -> bool {
        let shown = write!(self.output, "{} [y/N] ", removal_prompt(section_key.as_str()))
            .and_then(|()| self.output.flush());
        if let Err(err) = shown {
            tracing::warn!(section = %section_key, error = %err, "could not show removal prompt; declining");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}
