//! C++ code emitter - accumulates generated C++ source text
//!
//! Generated code is byte-exact: no indentation is added inside `main`, every statement occupies one line.

/// A buffer for building C++ source code line by line
#[derive(Debug, Default)]
pub struct CppEmitter {
    buffer: String,
    /// Statement lines written via [`CppEmitter::statement`]
    statements: usize,
}

impl CppEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write raw text (prologue/epilogue boilerplate)
    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Write one complete statement followed by a newline
    pub fn statement(&mut self, s: &str) {
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self.statements += 1;
    }

    /// Number of statements written so far
    pub fn statement_count(&self) -> usize {
        self.statements
    }
}
