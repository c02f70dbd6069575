//! Mesh file options

/// Options for reading mesh files
#[derive(Debug, Clone)]
pub struct MeshReadOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// Trim whitespace around values
    pub trim: bool,
    /// Pad short rows with zeros instead of failing
    pub allow_ragged: bool,
}

impl Default for MeshReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            trim: true,
            allow_ragged: false,
        }
    }
}

/// Options for writing mesh files
#[derive(Debug, Clone)]
pub struct MeshWriteOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// End every line with a delimiter
    pub trailing_delimiter: bool,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for MeshWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            trailing_delimiter: false,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}
