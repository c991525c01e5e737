//! Overlay geometry parsing and resolution.
//!
//! Geometry strings follow the familiar X11 form `WxH+X+Y`:
//! - `W` and `H` are required syntactically; a value `<= 0` means "full extent"
//! - `+X` / `-X` is optional, and `+Y` / `-Y` is only accepted after `X`
//! - omitted offsets keep whatever offset was in effect before
//!
//! Parsing is strict: any malformed or trailing input is rejected so the
//! overlay never starts with ambiguous geometry.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Reasons a geometry string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("expected a number at offset {pos} in `{input}`")]
    MissingNumber { input: String, pos: usize },

    #[error("number at offset {pos} in `{input}` is out of range")]
    OutOfRange { input: String, pos: usize },

    #[error("expected `x` after the width in `{input}`")]
    MissingSeparator { input: String },

    #[error("unexpected trailing input `{rest}` in `{input}`")]
    TrailingInput { input: String, rest: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsed Argument
// ─────────────────────────────────────────────────────────────────────────────

/// A single parsed `--geometry` value.
///
/// An empty string is valid and leaves the accumulated geometry untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryArg {
    #[default]
    Unchanged,
    Set {
        /// `None` means full output width
        width: Option<u32>,
        /// `None` means full output height
        height: Option<u32>,
        /// `None` keeps the prior X offset
        x: Option<i32>,
        /// `None` keeps the prior Y offset
        y: Option<i32>,
    },
}

impl FromStr for GeometryArg {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(GeometryArg::Unchanged);
        }

        let mut cursor = Cursor::new(s);

        let width = extent(cursor.integer()?);
        if !cursor.eat_separator() {
            return Err(GeometryError::MissingSeparator {
                input: s.to_string(),
            });
        }
        let height = extent(cursor.integer()?);

        let mut x = None;
        let mut y = None;
        if cursor.at_sign() {
            x = Some(cursor.integer()?);
            if cursor.at_sign() {
                y = Some(cursor.integer()?);
            }
        }

        if !cursor.is_done() {
            return Err(GeometryError::TrailingInput {
                input: s.to_string(),
                rest: cursor.rest().to_string(),
            });
        }

        Ok(GeometryArg::Set {
            width,
            height,
            x,
            y,
        })
    }
}

/// Non-positive extents collapse to "full".
fn extent(value: i32) -> Option<u32> {
    u32::try_from(value).ok().filter(|&v| v > 0)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn at_sign(&self) -> bool {
        matches!(self.peek(), Some(b'+' | b'-'))
    }

    fn eat_separator(&mut self) -> bool {
        if matches!(self.peek(), Some(b'x' | b'X')) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume an optionally signed decimal integer.
    fn integer(&mut self) -> Result<i32, GeometryError> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut end = start;

        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits_start = end;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits_start {
            return Err(GeometryError::MissingNumber {
                input: self.input.to_string(),
                pos: start,
            });
        }

        let value = self.input[start..end]
            .parse::<i32>()
            .map_err(|_| GeometryError::OutOfRange {
                input: self.input.to_string(),
                pos: start,
            })?;
        self.pos = end;
        Ok(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accumulated Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Overlay placement before it is resolved against a real output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometrySpec {
    pub x: i32,
    pub y: i32,
    /// `None` resolves to the full output width
    pub width: Option<u32>,
    /// `None` resolves to the full output height
    pub height: Option<u32>,
}

impl GeometrySpec {
    /// Fold a parsed argument into this geometry.
    ///
    /// Width and height are always replaced; offsets only when given.
    pub fn apply(self, arg: &GeometryArg) -> Self {
        match *arg {
            GeometryArg::Unchanged => self,
            GeometryArg::Set {
                width,
                height,
                x,
                y,
            } => Self {
                x: x.unwrap_or(self.x),
                y: y.unwrap_or(self.y),
                width,
                height,
            },
        }
    }

    /// Fold every argument in order, starting from the full-output default.
    pub fn from_args<'a>(args: impl IntoIterator<Item = &'a GeometryArg>) -> Self {
        args.into_iter()
            .fold(Self::default(), |spec, arg| spec.apply(arg))
    }

    /// Resolve against the output area's size.
    pub fn resolve(&self, output_width: u32, output_height: u32) -> OverlayRect {
        OverlayRect {
            x: self.x,
            y: self.y,
            width: self.width.unwrap_or(output_width),
            height: self.height.unwrap_or(output_height),
        }
    }
}

impl FromStr for GeometrySpec {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arg: GeometryArg = s.parse()?;
        Ok(Self::default().apply(&arg))
    }
}

/// A concrete overlay rectangle in root-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for OverlayRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}
