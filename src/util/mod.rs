#![allow(clippy::module_name_repetitions)]
//! Small utilities: shell quoting for generated scripts, uniqueness tokens, line-atomic script files.

pub mod id;
pub mod shell_file;

pub use shell_file::ShellFile;

/// Single-quote a literal for the shell; plain words pass through unchanged.
pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

/// Render `s` as the body of a double-quoted shell word.
///
/// `$` is left alone so parameter expansions run when the script executes; `\`, `"` and
/// backtick are escaped. Newline and carriage return become `${nl}` / `${cr}`, which the
/// caller must define, keeping the result on one line.
pub fn double_quote_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("${nl}"),
            '\r' => out.push_str("${cr}"),
            c => out.push(c),
        }
    }
    out
}

/// Reject strings containing NUL; they cannot be passed through a shell script.
pub fn reject_nul(s: &str, what: &str) -> Result<(), String> {
    if s.contains('\0') {
        Err(format!("refusing to template {what}: contains NUL"))
    } else {
        Ok(())
    }
}
