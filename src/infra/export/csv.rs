use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::sheet::Entry;

/// Writes the header and each entry, cells padded or cut to header width.
pub fn write_entries<W: Write>(writer: W, header: &[String], entries: &[Entry<'_>]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(header)
        .context("failed to write csv header")?;

    for entry in entries {
        let row: Vec<&str> = (0..header.len())
            .map(|col| entry.cell(Some(col)))
            .collect();
        csv_writer
            .write_record(&row)
            .context("failed to write csv record")?;
    }
    csv_writer.flush().context("failed to flush csv")?;

    Ok(entries.len())
}

pub fn export_entries(path: &Path, header: &[String], entries: &[Entry<'_>]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create csv: {}", path.display()))?;
    write_entries(file, header, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::sheet::Sheet;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn writes_header_and_padded_rows() {
        let sheet = Sheet::new(vec![
            row(&["Nome", "Telefone", "Status"]),
            row(&["Ana", "11999998888"]),
            row(&["Silva, Bia", "", "Atendido"]),
        ]);
        let entries: Vec<Entry<'_>> = sheet.entries().collect();
        let mut out = Vec::new();

        let written = write_entries(&mut out, sheet.header(), &entries).expect("export should succeed");

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Nome,Telefone,Status\nAna,11999998888,\n\"Silva, Bia\",,Atendido\n"
        );
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("pacientes.csv");
        let sheet = Sheet::new(vec![row(&["Nome"]), row(&["Ana"])]);
        let entries: Vec<Entry<'_>> = sheet.entries().collect();

        export_entries(&path, sheet.header(), &entries).expect("export should succeed");

        assert_eq!(std::fs::read_to_string(&path).expect("read back"), "Nome\nAna\n");
    }
}
