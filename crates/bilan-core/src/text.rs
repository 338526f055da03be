//! Small text helpers shared by import and report ordering.

/// Fold French diacritics to their base letter. Characters outside the
/// folding table pass through unchanged.
pub(crate) fn fold_diacritics(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'î' | 'ï' | 'Î' | 'Ï' => 'i',
        'ô' | 'ö' | 'Ô' | 'Ö' => 'o',
        'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        other => other,
    }
}

/// Accent-insensitive, case-insensitive key for ordering names the way a
/// French class list is ordered ("Élodie" sorts with "Elodie").
pub(crate) fn name_sort_key(s: &str) -> String {
    s.chars()
        .map(fold_diacritics)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize a CSV header label: lowercase, accents folded, whitespace runs
/// collapsed to single spaces.
pub(crate) fn normalize_header(s: &str) -> String {
    let folded: String = s
        .chars()
        .map(fold_diacritics)
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents() {
        assert_eq!(name_sort_key("Élodie"), "elodie");
        assert_eq!(name_sort_key("FRANÇOIS"), "francois");
    }

    #[test]
    fn sort_key_orders_accented_names_together() {
        let mut names = vec!["Zoé", "Émile", "Adam", "Eric"];
        names.sort_by_key(|n| name_sort_key(n));
        assert_eq!(names, vec!["Adam", "Émile", "Eric", "Zoé"]);
    }

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("  N °  Candidat "), "n ° candidat");
        assert_eq!(normalize_header("Prénom"), "prenom");
    }
}
