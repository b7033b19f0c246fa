use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
};

/// The outside world as seen by a running program.
///
/// `PRINT` writes through the output sink and `READ` blocks on the input
/// source. Both are fallible; failures surface as runtime errors.
pub trait Host {
    /// Writes one line of output.
    ///
    /// # Errors
    /// Any I/O error from the underlying sink.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Shows the optional prompt and reads one line of input, without its
    /// line terminator. `Ok(None)` signals end of input.
    ///
    /// # Errors
    /// Any I/O error from the underlying source.
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>>;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// The process's standard output and standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdHost;

impl Host for StdHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(prompt) = prompt {
            let mut out = io::stdout().lock();
            write!(out, "{prompt} ")?;
            out.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// An in-memory host: scripted input lines in, captured output lines out.
///
/// Used to run programs without touching the process's streams.
///
/// # Example
/// ```
/// use stackline::interpreter::evaluator::host::{BufferHost, Host};
///
/// let mut host = BufferHost::with_input(["42"]);
///
/// assert_eq!(host.read_line(Some("Age?")).unwrap(), Some("42".to_string()));
/// assert_eq!(host.read_line(None).unwrap(), None);
/// host.write_line("hi").unwrap();
///
/// assert_eq!(host.output(), ["hi"]);
/// assert_eq!(host.prompts(), ["Age?"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BufferHost {
    input:   VecDeque<String>,
    output:  Vec<String>,
    prompts: Vec<String>,
}

impl BufferHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host that answers reads with `lines`, in order.
    pub fn with_input<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { input: lines.into_iter().map(Into::into).collect(),
               ..Self::default() }
    }

    /// Every line written so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Every prompt shown so far.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Host for BufferHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(prompt) = prompt {
            self.prompts.push(prompt.to_string());
        }

        Ok(self.input.pop_front())
    }
}
