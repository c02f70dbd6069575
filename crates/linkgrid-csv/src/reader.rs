//! Mesh file reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{CsvError, CsvResult};
use crate::options::MeshReadOptions;
use linkgrid_core::{Mesh, Value};

/// Mesh file reader
pub struct MeshReader;

impl MeshReader {
    /// Read a mesh file into a new mesh
    pub fn read_file<P: AsRef<Path>>(path: P, options: &MeshReadOptions) -> CsvResult<Mesh> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read from a reader into a new mesh
    pub fn read<R: Read>(reader: R, options: &MeshReadOptions) -> CsvResult<Mesh> {
        let mut mesh = Mesh::new();
        Self::read_into(&mut mesh, reader, options)?;
        Ok(mesh)
    }

    /// Read from a reader into an existing mesh
    ///
    /// The whole input is parsed first; the mesh is then resized to the
    /// counted rows and columns and filled cell by cell. A parse error leaves
    /// the mesh untouched.
    pub fn read_into<R: Read>(
        mesh: &mut Mesh,
        reader: R,
        options: &MeshReadOptions,
    ) -> CsvResult<()> {
        let rows = Self::parse(reader, options)?;
        let cols = rows.first().map_or(0, Vec::len);

        mesh.resize(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                mesh.set(r, c, value)?;
            }
        }

        debug!("loaded {}x{} mesh", mesh.rows(), mesh.cols());
        Ok(())
    }

    /// Parse every line into a row of values
    fn parse<R: Read>(reader: R, options: &MeshReadOptions) -> CsvResult<Vec<Vec<Value>>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let mut fields: Vec<&str> = record.iter().collect();
            if fields.len() > 1 && fields.last() == Some(&"") {
                fields.pop();
            }
            if fields.iter().all(|field| field.is_empty()) {
                continue;
            }

            let row_number = rows.len() + 1;
            let values = fields
                .iter()
                .enumerate()
                .map(|(c, field)| {
                    field.parse::<Value>().map_err(|e| CsvError::Parse {
                        row: row_number,
                        column: c + 1,
                        message: format!("'{field}': {e}"),
                    })
                })
                .collect::<CsvResult<Vec<Value>>>()?;

            if let Some(first) = rows.first() {
                if values.len() != first.len() && !options.allow_ragged {
                    return Err(CsvError::Ragged {
                        row: row_number,
                        expected: first.len(),
                        found: values.len(),
                    });
                }
            }
            rows.push(values);
        }

        if options.allow_ragged {
            let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
            for row in &mut rows {
                row.resize(cols, 0);
            }
        }
        Ok(rows)
    }
}
