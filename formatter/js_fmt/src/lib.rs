//! JavaScript reformatter.
//!
//! Reproduces a script's token stream exactly while re-deriving
//! whitespace, indentation, and line breaks into a consistent layout, and
//! simultaneously builds a bidirectional offset mapping between positions
//! in the original and the reformatted text. Downstream tooling uses the
//! mapping to translate locations (breakpoints, error positions, search
//! hits) between the two views.
//!
//! # Architecture
//!
//! Three components, consumed bottom-up:
//!
//! 1. **Token adapter** ([`js_lexer::TokenStream`]): normalizes raw
//!    scanner output into one closed token-kind set and resolves the
//!    `/` ambiguity (division vs regex literal) from a grammar hint.
//! 2. **Layout builder** ([`LayoutBuilder`]): append-only output
//!    accumulator tracking nesting depth, deferred line breaks, and the
//!    compressed offset mapping. No grammar knowledge.
//! 3. **Formatter** ([`Formatter`]): recursive-descent walker over the
//!    full statement and expression grammar, driving the builder.
//!
//! Formatting is all-or-nothing: the first unexpected token aborts with a
//! [`FormatError`] and no partial output escapes. Each invocation builds
//! fresh state, so formatting independent scripts concurrently on
//! separate calls needs no synchronization.
//!
//! # Example
//!
//! ```
//! let result = js_fmt::format("if(a)b();")?;
//! assert_eq!(result.text, "if (a)\n    b();");
//! # Ok::<(), js_fmt::FormatError>(())
//! ```

pub mod builder;
mod error;
mod formatter;

pub use builder::LayoutBuilder;
pub use error::FormatError;
pub use formatter::Formatter;
pub use js_ir::SourceMapping;

/// Spaces per indentation level by default.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Text prepended once per nesting level.
    pub indent_unit: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            indent_unit: " ".repeat(DEFAULT_INDENT_WIDTH),
        }
    }
}

impl FormatOptions {
    /// Options indenting with `width` spaces per level.
    pub fn with_indent_width(width: usize) -> Self {
        FormatOptions {
            indent_unit: " ".repeat(width),
        }
    }
}

/// The immutable result of one formatting invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSource {
    /// The reformatted program text.
    pub text: String,
    /// Original ↔ formatted offset mapping.
    pub mapping: SourceMapping,
}

/// Format `source` with default options.
pub fn format(source: &str) -> Result<FormattedSource, FormatError> {
    format_with_options(source, &FormatOptions::default())
}

/// Format `source` with the given options.
pub fn format_with_options(
    source: &str,
    options: &FormatOptions,
) -> Result<FormattedSource, FormatError> {
    Formatter::new(source, options).format()
}
