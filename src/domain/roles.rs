pub const STATUS_KEYWORDS: &[&str] = &["status", "situação", "retorno"];
pub const LAST_CONTACT_KEYWORDS: &[&str] =
    &["contato", "ultimo", "último", "last contact", "data contato"];
pub const IDENTIFIER_KEYWORDS: &[&str] = &["cpf"];

/// Semantic columns inferred from header text. `None` means the sheet has
/// no column for that role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub status: Option<usize>,
    pub last_contact: Option<usize>,
    pub identifier: Option<usize>,
}

pub fn header_role(headers: &[String]) -> ColumnRoles {
    ColumnRoles {
        status: find_column(headers, STATUS_KEYWORDS),
        last_contact: find_column(headers, LAST_CONTACT_KEYWORDS),
        identifier: find_column(headers, IDENTIFIER_KEYWORDS),
    }
}

/// First header containing any keyword, case-insensitively.
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let lowered = header.to_lowercase();
        keywords.iter().any(|keyword| lowered.contains(keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn detects_roles_from_portuguese_headers() {
        let roles = header_role(&headers(&[
            "Nome",
            "Telefone",
            "CPF",
            "Status",
            "Último Contato",
        ]));

        assert_eq!(
            roles,
            ColumnRoles {
                status: Some(3),
                last_contact: Some(4),
                identifier: Some(2),
            }
        );
    }

    #[test]
    fn first_matching_header_wins() {
        let roles = header_role(&headers(&["Retorno", "Situação", "Status"]));

        assert_eq!(roles.status, Some(0));
    }

    #[test]
    fn missing_roles_are_none() {
        let roles = header_role(&headers(&["Nome", "Email"]));

        assert_eq!(roles, ColumnRoles::default());
        assert_eq!(header_role(&[]), ColumnRoles::default());
    }

    #[test]
    fn matching_ignores_case_and_accents_stay_significant() {
        let roles = header_role(&headers(&["SITUAÇÃO", "ULTIMO contato", "cpf do paciente"]));

        assert_eq!(roles.status, Some(0));
        assert_eq!(roles.last_contact, Some(1));
        assert_eq!(roles.identifier, Some(2));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(raw in proptest::collection::vec(".{0,16}", 0..8)) {
            prop_assert_eq!(header_role(&raw), header_role(&raw));
        }
    }
}
