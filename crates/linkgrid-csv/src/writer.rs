//! Mesh file writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{LineTerminator, MeshWriteOptions};
use linkgrid_core::Mesh;

/// Mesh file writer
pub struct MeshWriter;

impl MeshWriter {
    /// Write a mesh to a file
    pub fn write_file<P: AsRef<Path>>(
        mesh: &Mesh,
        path: P,
        options: &MeshWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(mesh, file, options)
    }

    /// Write a mesh to a writer
    ///
    /// A mesh without columns has no representable rows and produces no output.
    pub fn write<W: Write>(mesh: &Mesh, writer: W, options: &MeshWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .terminator(terminator)
            .from_writer(writer);

        if mesh.cols() > 0 {
            for row in mesh.to_rows() {
                let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                if options.trailing_delimiter {
                    record.push(String::new());
                }
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(mesh: &Mesh, options: &MeshWriteOptions) -> String {
        let mut buf = Vec::new();
        MeshWriter::write(mesh, &mut buf, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_default() {
        let mesh = Mesh::from_rows(&[vec![1, -2], vec![30, 4]]).unwrap();
        assert_eq!(write(&mesh, &MeshWriteOptions::default()), "1;-2\n30;4\n");
    }

    #[test]
    fn test_write_trailing_delimiter_crlf() {
        let mesh = Mesh::from_rows(&[vec![1, 2]]).unwrap();
        let options = MeshWriteOptions {
            trailing_delimiter: true,
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        assert_eq!(write(&mesh, &options), "1;2;\r\n");
    }

    #[test]
    fn test_write_without_columns() {
        let mesh = Mesh::create(3, 0).unwrap();
        assert_eq!(write(&mesh, &MeshWriteOptions::default()), "");
    }
}
