// SPDX-License-Identifier: CEPL-1.0
use std::fmt::Write as _;

/// Words per line in the emitted array.
pub const COLUMNS: usize = 8;
/// Spaces before each line of literals.
pub const INDENT: usize = 4;

#[derive(Clone, Debug, Default)]
pub struct HeaderOptions {
    /// Boilerplate lines placed in the leading comment block.
    pub banner: Vec<String>,
}

/// Renders the header text. Output is deterministic for identical inputs.
/// An empty word list still declares the array, with size 0.
pub fn format_header(words: &[u32], report: &str, symbol: &str, opts: &HeaderOptions) -> String {
    let literals: Vec<String> = words
        .chunks(COLUMNS)
        .map(|row| {
            let cols: Vec<String> = row.iter().map(|w| format!("{w:#010x}")).collect();
            format!("{:indent$}{},", "", cols.join(", "), indent = INDENT)
        })
        .collect();

    let mut out = String::from("//\n");
    for line in &opts.banner {
        let _ = writeln!(out, "//   {line}");
    }
    out.push_str("//\n\n");
    out.push_str("// This file is generated, don't attempt to modify it.\n\n");
    let _ = write!(
        out,
        "#if 0\n{report}\n#endif\n\nstatic const unsigned int {symbol}[{}] = {{\n{}\n}};\n",
        words.len(),
        literals.join("\n")
    );
    out
}
