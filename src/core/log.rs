//! Append-only log buffer shown in the log pane

/// Join parts with single spaces, the way every log line is built
pub fn join_parts<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(part.as_ref());
    }
    line
}

/// Build a log line from heterogeneous `Display` parts
macro_rules! log_line {
    ($($part:expr),+ $(,)?) => {
        $crate::core::log::join_parts([$($part.to_string()),+])
    };
}
pub(crate) use log_line;

/// Ordered text buffer; lines are only ever appended or cleared together
#[derive(Debug, Default, Clone)]
pub struct LogSink {
    buf: String,
    lines: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line made of space-joined `parts`
    pub fn append<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append_line(&join_parts(parts));
    }

    /// Append an already formatted line
    pub fn append_line(&mut self, line: &str) {
        self.buf.push_str(line);
        self.buf.push('\n');
        self.lines += 1;
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.lines = 0;
    }

    /// Full buffer content, one `\n`-terminated line per append
    pub fn text(&self) -> &str {
        &self.buf
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buf.lines()
    }

    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}
