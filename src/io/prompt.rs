//! Terminal interaction: conflict prompts and overwrite confirmation
//!
//! Both work over any `BufRead`/`Write` pair so scripted input can drive them.
//! Prompt output is best-effort; a failed write never changes the decision.

use std::io::{BufRead, Stderr, StdinLock, Write};
use std::path::Path;

use crate::reconcile::merge::{Conflict, ConflictResolver, Resolution};

const CHOICES: &str = "please choose [local] [alwayslocal] [remote] [alwaysremote] [custom] or [exit]";

/// Conflict resolver that asks a person
///
/// Accepts `local`, `alwayslocal`, `remote`, `alwaysremote`, `custom`
/// (followed by a line of tile data) and `exit`/`quit`, case-insensitively.
/// End of input aborts the merge.
pub struct ConsoleResolver<R, W> {
    input: R,
    output: W,
}

impl ConsoleResolver<StdinLock<'static>, Stderr> {
    /// Resolver reading stdin and prompting on stderr
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsoleResolver<R, W> {
    /// Create a resolver over explicit streams
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> ConflictResolver for ConsoleResolver<R, W> {
    fn resolve(&mut self, conflict: &Conflict<'_>) -> Resolution {
        let _ = writeln!(self.output, "{conflict}, {CHOICES}");
        loop {
            let Some(answer) = self.read_line() else {
                return Resolution::Abort;
            };
            match answer.trim().to_lowercase().as_str() {
                "local" => return Resolution::UseLocal,
                "alwayslocal" => return Resolution::MakeLocalSticky,
                "remote" => return Resolution::UseRemote,
                "alwaysremote" => return Resolution::MakeRemoteSticky,
                "custom" => {
                    let _ = write!(self.output, "Tile data: ");
                    let _ = self.output.flush();
                    return self
                        .read_line()
                        .map_or(Resolution::Abort, Resolution::UseCustom);
                }
                "exit" | "quit" => return Resolution::Abort,
                _ => {
                    let _ = writeln!(self.output, "Invalid input.");
                }
            }
        }
    }
}

/// Ask whether an existing file may be replaced; anything but `y`/`yes` declines
pub fn confirm_overwrite<R: BufRead, W: Write>(mut input: R, mut output: W, path: &Path) -> bool {
    let _ = write!(
        output,
        "File '{}' exists! Overwrite?\n[y/N] >",
        path.display()
    );
    let _ = output.flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
