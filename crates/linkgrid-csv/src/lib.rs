//! # linkgrid-csv
//!
//! Reader and writer for the flat mesh format: one row per line, values
//! separated by `;`, an optional trailing `;` at the end of a line.
//!
//! ```rust
//! use linkgrid_csv::{MeshReadOptions, MeshReader};
//!
//! let mesh = MeshReader::read("3;1;1;\n2;5;1;\n1;1;6;\n".as_bytes(), &MeshReadOptions::default())
//!     .unwrap();
//! assert_eq!(mesh.rows(), 3);
//! assert_eq!(mesh.get(1, 1).unwrap(), 5);
//! ```

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{LineTerminator, MeshReadOptions, MeshWriteOptions};
pub use reader::MeshReader;
pub use writer::MeshWriter;
