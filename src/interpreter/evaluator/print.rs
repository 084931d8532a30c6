/// Where `print` output goes.
///
/// Uses enum dispatch rather than a trait object; there are only two
/// destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PrintHandler {
    /// Writes each line to stdout.
    #[default]
    Stdout,
    /// Collects lines in memory, for tests and embedding.
    Buffer(String),
}

impl PrintHandler {
    /// Prints one line.
    pub fn println(&mut self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buffer) => {
                buffer.push_str(line);
                buffer.push('\n');
            },
        }
    }

    /// Drains the captured output. Always empty for [`PrintHandler::Stdout`].
    pub fn take_output(&mut self) -> String {
        match self {
            Self::Stdout => String::new(),
            Self::Buffer(buffer) => std::mem::take(buffer),
        }
    }
}
