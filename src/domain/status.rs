use crate::domain::entities::sheet::cell;

pub const PENDING_LABEL: &str = "Pendente";
pub const ATTENDED_LABEL: &str = "Atendido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Attended,
}

impl Status {
    /// Any label mentioning "atendido" counts as attended; everything else,
    /// empty included, is pending.
    pub fn classify(label: &str) -> Self {
        if label.to_lowercase().contains("atendido") {
            Status::Attended
        } else {
            Status::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => PENDING_LABEL,
            Status::Attended => ATTENDED_LABEL,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Attended,
            Status::Attended => Status::Pending,
        }
    }
}

/// Display label of a record's status, raw text preserved.
pub fn current_status(record: &[String], status_col: Option<usize>) -> &str {
    match cell(record, status_col) {
        "" => PENDING_LABEL,
        label => label,
    }
}

pub fn classify_record(record: &[String], status_col: Option<usize>) -> Status {
    Status::classify(current_status(record, status_col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_or_missing_status_is_pending() {
        assert_eq!(current_status(&record(&["Ana", ""]), Some(1)), "Pendente");
        assert_eq!(current_status(&record(&["Ana"]), Some(1)), "Pendente");
        assert_eq!(current_status(&record(&["Ana", "Atendido"]), None), "Pendente");
        assert_eq!(classify_record(&record(&["Ana"]), None), Status::Pending);
    }

    #[test]
    fn raw_label_is_preserved_for_display() {
        let row = record(&["Ana", "Em análise"]);

        assert_eq!(current_status(&row, Some(1)), "Em análise");
        assert_eq!(classify_record(&row, Some(1)), Status::Pending);
    }

    #[test]
    fn attended_matches_substring_case_insensitively() {
        assert_eq!(Status::classify("ATENDIDO"), Status::Attended);
        assert_eq!(Status::classify("Atendido em 02/01"), Status::Attended);
        assert_eq!(Status::classify("Pendente"), Status::Pending);
    }

    #[test]
    fn toggle_flips_canonical_labels() {
        assert_eq!(Status::classify("Pendente").toggled().label(), "Atendido");
        assert_eq!(Status::classify("atendido").toggled().label(), "Pendente");
    }

    proptest! {
        #[test]
        fn classification_is_total_and_display_verbatim(label in ".{0,24}") {
            let row = vec![label.clone()];
            let shown = current_status(&row, Some(0));
            let status = classify_record(&row, Some(0));

            prop_assert!(matches!(status, Status::Pending | Status::Attended));
            if label.is_empty() {
                prop_assert_eq!(shown, PENDING_LABEL);
            } else {
                prop_assert_eq!(shown, label.as_str());
            }
        }
    }
}
