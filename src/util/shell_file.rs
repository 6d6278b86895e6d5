use std::io;

/// Builder for a shell script file written to disk and later executed.
///
/// Invariants:
/// - The first line is the shebang built from the interpreter path.
/// - Each pushed line must not contain `\n`, `\r`, or `\0`; callers encode those themselves.
/// - `build()` joins lines with `\n` and ends with a trailing newline.
#[derive(Debug)]
pub struct ShellFile {
    interpreter: String,
    lines: Vec<String>,
}

impl ShellFile {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            lines: Vec::new(),
        }
    }

    /// Push one logical line (no embedded newlines).
    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn build(&self) -> io::Result<String> {
        let shebang = format!("#!{}", self.interpreter);
        for (i, l) in std::iter::once(&shebang).chain(&self.lines).enumerate() {
            if l.contains('\n') || l.contains('\r') || l.contains('\0') {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("script line {i} contains a newline or NUL; use atomic lines"),
                ));
            }
        }

        let mut out = shebang;
        for l in &self.lines {
            out.push('\n');
            out.push_str(l);
        }
        out.push('\n');
        Ok(out)
    }
}
