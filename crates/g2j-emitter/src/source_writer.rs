//! Output buffer for generated Java text.

use std::fmt::Write;

#[derive(Debug, Default, Clone)]
pub struct SourceWriter {
    output: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    #[inline]
    pub fn write_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    pub fn write_space(&mut self) {
        self.output.push(' ');
    }

    pub fn write_usize(&mut self, value: usize) {
        // Writing into a String cannot fail.
        let _ = write!(self.output, "{value}");
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn into_string(self) -> String {
        self.output
    }
}
