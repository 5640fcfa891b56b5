/// Raw grid as returned by the spreadsheet: row 0 is the header, every
/// other row is a patient record. Rows may be shorter than the header.
pub type SheetValues = Vec<Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    rows: SheetValues,
}

/// A record paired with its position in the full sheet (header included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub absolute_index: usize,
    pub record: &'a [String],
}

impl Entry<'_> {
    pub fn cell(&self, col: Option<usize>) -> &str {
        cell(self.record, col)
    }
}

impl Sheet {
    pub fn new(rows: SheetValues) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, absolute_index: usize) -> Option<&[String]> {
        self.rows.get(absolute_index).map(Vec::as_slice)
    }

    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// True when `absolute_index` addresses a record (never the header).
    pub fn is_record_index(&self, absolute_index: usize) -> bool {
        absolute_index >= 1 && absolute_index < self.rows.len()
    }

    /// Every record in sheet order, header skipped.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(absolute_index, record)| Entry {
                absolute_index,
                record: record.as_slice(),
            })
    }

    /// Replaces exactly one row. Returns false when the index is out of range.
    pub fn replace_row(&mut self, absolute_index: usize, values: Vec<String>) -> bool {
        match self.rows.get_mut(absolute_index) {
            Some(row) => {
                *row = values;
                true
            }
            None => false,
        }
    }
}

/// Cell lookup tolerant of absent roles and short records.
pub fn cell(record: &[String], col: Option<usize>) -> &str {
    col.and_then(|idx| record.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn entries_skip_header_and_keep_absolute_indices() {
        let sheet = Sheet::new(vec![
            strings(&["Nome", "Status"]),
            strings(&["Ana", "Pendente"]),
            strings(&["Bia"]),
        ]);

        let indices: Vec<usize> = sheet.entries().map(|e| e.absolute_index).collect();

        assert_eq!(indices, vec![1, 2]);
        assert_eq!(sheet.record_count(), 2);
    }

    #[test]
    fn cell_tolerates_missing_role_and_short_rows() {
        let record = strings(&["Ana"]);

        assert_eq!(cell(&record, None), "");
        assert_eq!(cell(&record, Some(4)), "");
        assert_eq!(cell(&record, Some(0)), "Ana");
    }

    #[test]
    fn empty_sheet_has_empty_header() {
        let sheet = Sheet::default();

        assert!(sheet.header().is_empty());
        assert_eq!(sheet.entries().count(), 0);
        assert_eq!(sheet.record_count(), 0);
    }

    #[test]
    fn replace_row_rejects_out_of_range() {
        let mut sheet = Sheet::new(vec![strings(&["Nome"]), strings(&["Ana"])]);

        assert!(sheet.replace_row(1, strings(&["Bia"])));
        assert!(!sheet.replace_row(5, strings(&["Caio"])));
        assert_eq!(sheet.row(1), Some(strings(&["Bia"]).as_slice()));
    }
}
