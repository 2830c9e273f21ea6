// SPDX-License-Identifier: MIT

use std::io::IsTerminal;

use clap::Parser;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use lines_diff::diff::{compute_diff, DiffOptions, LinesDiff};
use lines_diff::utils::{read_lines, Result};

#[derive(Parser, Debug)]
pub struct Options {
    /// The original file.
    pub original: std::path::PathBuf,

    /// The modified file.
    pub modified: std::path::PathBuf,

    /// Report lines that differ only in leading/trailing whitespace as equal.
    #[clap(long)]
    pub ignore_trim_whitespace: bool,

    /// Time budget in milliseconds; 0 disables the limit.
    #[clap(long, default_value = "5000")]
    pub max_time_ms: u64,

    /// Also detect moved blocks.
    #[clap(long)]
    pub moves: bool,

    /// Extend character diffs to camelCase sub-word boundaries.
    #[clap(long)]
    pub subwords: bool,

    /// Whether the output should be colored.
    #[clap(long)]
    pub color: Option<bool>,
}

struct Colors {
    header: ColorSpec,
    old: ColorSpec,
    new: ColorSpec,
    moved: ColorSpec,
}
impl Colors {
    fn new() -> Self {
        let mut header = ColorSpec::new();
        header.set_fg(Some(Color::Cyan));
        let mut old = ColorSpec::new();
        old.set_fg(Some(Color::Red));
        let mut new = ColorSpec::new();
        new.set_fg(Some(Color::Green));
        let mut moved = ColorSpec::new();
        moved.set_fg(Some(Color::Yellow));
        Colors {
            header,
            old,
            new,
            moved,
        }
    }
}

fn write_diff(
    out: &mut dyn WriteColor,
    diff: &LinesDiff,
    original_lines: &[String],
    modified_lines: &[String],
) -> std::io::Result<()> {
    let colors = Colors::new();

    for change in &diff.changes {
        out.set_color(&colors.header)?;
        writeln!(
            out,
            "@@ -{},{} +{},{} @@",
            change.original.start_line_number,
            change.original.length(),
            change.modified.start_line_number,
            change.modified.length(),
        )?;

        out.set_color(&colors.old)?;
        for line in change.original.iter() {
            writeln!(out, "-{}", original_lines[line as usize - 1])?;
        }
        out.set_color(&colors.new)?;
        for line in change.modified.iter() {
            writeln!(out, "+{}", modified_lines[line as usize - 1])?;
        }
        out.reset()?;
    }

    for moved in &diff.moves {
        out.set_color(&colors.moved)?;
        writeln!(
            out,
            "moved: {} -> {}",
            moved.line_range_mapping.original, moved.line_range_mapping.modified,
        )?;
        out.reset()?;
    }

    if diff.hit_timeout {
        writeln!(out, "note: time budget exceeded, diff may be coarse")?;
    }
    Ok(())
}

fn do_main() -> Result<()> {
    let args = Options::parse();

    let original_lines = read_lines(&args.original)?;
    let modified_lines = read_lines(&args.modified)?;

    let options = DiffOptions {
        ignore_trim_whitespace: args.ignore_trim_whitespace,
        max_computation_time_ms: args.max_time_ms,
        compute_moves: args.moves,
        extend_to_subwords: args.subwords,
    };
    let diff = compute_diff(&original_lines, &modified_lines, &options);

    let use_color = args.color.unwrap_or_else(|| std::io::stdout().is_terminal());
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut out = StandardStream::stdout(choice);

    write_diff(&mut out, &diff, &original_lines, &modified_lines)?;
    Ok(())
}

fn main() {
    if let Err(err) = do_main() {
        println!("{}", err);
        std::process::exit(1);
    }
}
