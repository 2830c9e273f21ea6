// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn read_lines_impl(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path).map_err(|err| format!("{}: {}", path.display(), err))?;
    let mut buffer = String::new();
    file.read_to_string(&mut buffer)
        .map_err(|err| format!("{}: {}", path.display(), err))?;
    Ok(split_lines(&buffer))
}

/// Read a text file as an array of lines, without line terminators.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    read_lines_impl(path.as_ref())
}

/// Split a document into lines the way an editor buffer does: a trailing
/// newline produces a final empty line, and an empty document is a single
/// empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                lines.push(std::mem::take(&mut current));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    lines.push(current);
    lines
}
