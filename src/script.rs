//! Fake executable body.
//!
//! The generated script, in order: touches the `.ran` marker, appends its argument vector to
//! `.args` (count then each argument, NUL-terminated), expands the configured output and appends
//! it to `.out`, writes it to stdout or stderr without a trailing newline, then exits with the
//! configured status.
use std::io;
use std::path::Path;

use crate::util::{double_quote_body, reject_nul, shell_escape, ShellFile};

pub const RAN_MARKER: &str = ".ran";
pub const OUTPUT_FILE: &str = ".out";
pub const ARGS_FILE: &str = ".args";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptSpec<'a> {
    pub output: &'a str,
    pub stream: OutputStream,
    pub exit_code: u8,
}

impl<'a> ScriptSpec<'a> {
    pub fn success(output: &'a str) -> Self {
        Self {
            output,
            stream: OutputStream::Stdout,
            exit_code: 0,
        }
    }

    pub fn failing(output: &'a str, exit_code: u8) -> Self {
        Self {
            output,
            stream: OutputStream::Stderr,
            exit_code,
        }
    }
}

fn utf8<'p>(p: &'p Path, what: &str) -> io::Result<&'p str> {
    p.to_str().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} is not valid UTF-8: {}", p.display()),
        )
    })
}

/// Render the script for a mock living in `dir`.
pub fn render(dir: &Path, interpreter: &Path, spec: &ScriptSpec<'_>) -> io::Result<String> {
    reject_nul(spec.output, "output").map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let dir = shell_escape(utf8(dir, "mock directory")?);
    let redirect = match spec.stream {
        OutputStream::Stdout => "",
        OutputStream::Stderr => " >&2",
    };

    let mut f = ShellFile::new(utf8(interpreter, "interpreter")?);
    f.push(format!("dir={dir}"))
        .push("nl=$(printf '\\n_'); nl=${nl%_}")
        .push("cr=$(printf '\\r')")
        .push(format!("touch \"$dir/{RAN_MARKER}\""))
        .push(format!(
            "{{ printf '%s\\0' \"$#\"; for a in \"$@\"; do printf '%s\\0' \"$a\"; done; }} >> \"$dir/{ARGS_FILE}\""
        ))
        .push(format!("output=\"{}\"", double_quote_body(spec.output)))
        .push(format!("printf '%s' \"$output\" >> \"$dir/{OUTPUT_FILE}\""))
        .push(format!("printf '%s' \"$output\"{redirect}"))
        .push(format!("exit {}", spec.exit_code));
    f.build()
}

/// Parse the `.args` record stream back into one argument vector per invocation.
///
/// A truncated trailing record (count without all its arguments) is dropped.
pub fn parse_invocations(raw: &[u8]) -> Vec<Vec<String>> {
    let mut fields = raw.split(|b| *b == 0);
    let mut out = Vec::new();
    while let Some(count) = fields.next() {
        let Some(n) = std::str::from_utf8(count)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        else {
            break;
        };
        let args: Vec<String> = fields
            .by_ref()
            .take(n)
            .map(|a| String::from_utf8_lossy(a).into_owned())
            .collect();
        if args.len() != n {
            break;
        }
        out.push(args);
    }
    out
}
