// SPDX-License-Identifier: MIT

use pretty_assertions::assert_eq;

use lines_diff::utils::split_lines;

#[test]
fn split_lines_editor_semantics() {
    assert_eq!(split_lines(""), vec![""]);
    assert_eq!(split_lines("a"), vec!["a"]);
    // A trailing newline produces a final empty line.
    assert_eq!(split_lines("a\n"), vec!["a", ""]);
    assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    assert_eq!(split_lines("\n\n"), vec!["", "", ""]);
}
