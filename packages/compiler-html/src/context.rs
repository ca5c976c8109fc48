/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Document `<title>`
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Email".to_string(),
        }
    }
}

/// Output buffer with indentation tracking
pub(crate) struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    pub(crate) fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub(crate) fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// `open`, then `body` one level deeper, then `close`
    pub(crate) fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) {
        self.add_line(open);
        self.indent();
        body(self);
        self.dedent();
        self.add_line(close);
    }

    pub(crate) fn get_output(self) -> String {
        self.buffer
    }
}
