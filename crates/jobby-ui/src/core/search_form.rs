//! Search-form pruning: drop empty fields from the submitted form data so the
//! query string only carries filled-in filters.

/// Value of one form-data entry. File entries are carried through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryValue<F> {
    /// Plain string value.
    Text(String),
    /// File upload, opaque to pruning.
    File(F),
}

impl<F> EntryValue<F> {
    const fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::File(_) => false,
        }
    }
}

/// Entries to keep when at least one text entry is blank; `None` when nothing needs pruning.
#[must_use]
pub fn retain_filled<F: Clone>(
    entries: &[(String, EntryValue<F>)],
) -> Option<Vec<(String, EntryValue<F>)>> {
    if !entries.iter().any(|(_, value)| value.is_blank()) {
        return None;
    }
    Some(
        entries
            .iter()
            .filter(|(_, value)| !value.is_blank())
            .cloned()
            .collect(),
    )
}

/// Distinct field names in first-seen order.
#[must_use]
pub fn field_names<F>(entries: &[(String, EntryValue<F>)]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for (name, _) in entries {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    type Entry = (String, EntryValue<&'static str>);

    fn entries(pairs: &[(&str, &str)]) -> Vec<Entry> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), EntryValue::Text((*value).to_string())))
            .collect()
    }

    #[test]
    fn filled_forms_are_left_alone() {
        assert_eq!(retain_filled(&entries(&[("titel", "Tester")])), None);
        assert_eq!(retain_filled::<()>(&[]), None);
    }

    #[test]
    fn blank_entries_are_dropped_in_order() {
        let form = entries(&[
            ("titel", ""),
            ("arbeitsort", "Dortmund"),
            ("beruf", ""),
            ("umkreis", "25"),
        ]);
        assert_eq!(
            retain_filled(&form),
            Some(entries(&[("arbeitsort", "Dortmund"), ("umkreis", "25")]))
        );
    }

    #[test]
    fn repeated_names_keep_their_filled_values() {
        let form = entries(&[("angebotsart", ""), ("angebotsart", "1"), ("page", "2")]);
        assert_eq!(
            retain_filled(&form),
            Some(entries(&[("angebotsart", "1"), ("page", "2")]))
        );
        assert_eq!(field_names(&form), vec!["angebotsart", "page"]);
    }

    #[test]
    fn file_entries_survive_while_blank_text_is_dropped() {
        let mut form = entries(&[("titel", ""), ("arbeitsort", "Dortmund")]);
        form.insert(1, ("lebenslauf".to_string(), EntryValue::File("cv.pdf")));

        let kept = retain_filled(&form);

        assert_eq!(
            kept,
            Some(vec![
                ("lebenslauf".to_string(), EntryValue::File("cv.pdf")),
                ("arbeitsort".to_string(), EntryValue::Text("Dortmund".to_string())),
            ])
        );
        assert_eq!(field_names(&form), vec!["titel", "lebenslauf", "arbeitsort"]);
    }

    #[test]
    fn forms_with_only_files_and_filled_text_are_left_alone() {
        let mut form = entries(&[("titel", "Tester")]);
        form.push(("lebenslauf".to_string(), EntryValue::File("cv.pdf")));
        assert_eq!(retain_filled(&form), None);
    }
}
