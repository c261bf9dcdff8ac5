//! Termtext Library
//!
//! Tokenizes terminal text into units and measures how many cells each unit
//! occupies. This crate provides:
//!
//! - `codes`: C0/C1 control constants and the Unicode newline set
//! - `parser`: Streaming tokenizer for plain characters, newlines, escape
//!   sequences and combining-mark clusters
//! - `measure`: Cursor advance per unit and per-line widths
//! - `text`: Measured text values
//! - `style`: SGR colours and styles with per-line re-wrapping
//! - `output`: Styled writer over any `io::Write`
//! - `input`: Key decoding for terminal input
//! - `app`: Configuration
//!
//! ```
//! use termtext::measure_text;
//!
//! assert_eq!(measure_text("hello, \x1b[32mworld\x1b[0m", 8).unwrap(), vec![12]);
//! assert_eq!(measure_text("hello\nｗｏｒｌｄ", 8).unwrap(), vec![5, 10]);
//! ```

pub mod app;
pub mod codes;
pub mod error;
pub mod input;
pub mod measure;
pub mod output;
pub mod parser;
pub mod style;
pub mod text;

pub use error::{Error, Result};
pub use measure::{measure_text, Advance, Measurer};
pub use parser::{tokenize, tokenize_reader, units, Unit};
pub use style::{Color, Style};
pub use text::Text;
