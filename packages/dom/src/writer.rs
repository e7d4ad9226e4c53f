/// Indentation-aware text buffer shared by the Java and XML renderers
pub struct SourceWriter {
    buffer: String,
    indent_level: usize,
    indent: String,
}

impl SourceWriter {
    pub fn new(indent: &str) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent: indent.to_string(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        self.add_indented(text);
        self.add("\n");
    }

    pub fn add_indented(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent);
        }
        self.buffer.push_str(text);
    }

    pub fn blank_line(&mut self) {
        self.add("\n");
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}
