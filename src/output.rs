//! Styled terminal output
//!
//! A thin writer over any [`io::Write`] sink that applies [`Style`]s with
//! per-line re-wrapping.

use std::fmt::Display;
use std::io::{self, Write};

use tracing::trace;

use crate::error::Result;
use crate::style::Style;

/// Line ending used by `print` unless overridden. The terminal may be in raw
/// mode, where LF alone does not return the cursor to column 0.
pub const DEFAULT_END: &str = "\r\n";

/// Options for [`StyledWriter::print`]
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Written between objects
    pub sep: String,
    /// Written after the last object
    pub end: String,
    /// Applied to each object (not to `sep` or `end`)
    pub style: Option<Style>,
    /// Flush the sink after printing
    pub flush: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            sep: " ".to_string(),
            end: DEFAULT_END.to_string(),
            style: None,
            flush: false,
        }
    }
}

impl PrintOptions {
    pub fn styled(style: Style) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }
}

/// Writer that styles text before passing it to `W`
#[derive(Debug)]
pub struct StyledWriter<W: Write> {
    inner: W,
}

impl StyledWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StyledWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write text as-is
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write text with `style` applied to each line
    pub fn write_styled(&mut self, text: &str, style: &Style) -> Result<()> {
        self.write(&style.apply(text))
    }

    /// Write each line followed by `end`, styling lines individually
    pub fn write_lines<I>(&mut self, lines: I, end: &str, style: Option<&Style>) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            match style {
                Some(style) => self.write_styled(line.as_ref(), style)?,
                None => self.write(line.as_ref())?,
            }
            self.write(end)?;
        }
        Ok(())
    }

    /// Print objects separated by `sep` and followed by `end`
    pub fn print<T: Display>(&mut self, objects: &[T], options: &PrintOptions) -> Result<()> {
        for (i, object) in objects.iter().enumerate() {
            if i > 0 {
                self.write(&options.sep)?;
            }
            let text = object.to_string();
            match &options.style {
                Some(style) => self.write_styled(&text, style)?,
                None => self.write(&text)?,
            }
        }
        self.write(&options.end)?;
        if options.flush {
            self.flush()?;
        }
        trace!(objects = objects.len(), "printed");
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
