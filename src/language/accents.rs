/// Base letter for the Spanish diacritics, identity for everything else.
pub fn fold_accent(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' | 'ü' => 'u',
        'ñ' => 'n',
        'Á' => 'A',
        'É' => 'E',
        'Í' => 'I',
        'Ó' => 'O',
        'Ú' | 'Ü' => 'U',
        'Ñ' => 'N',
        other => other,
    }
}

pub fn strip_accents(word: &str) -> String {
    word.chars().map(fold_accent).collect()
}

/// Accented letters a player may type.
pub fn is_accented_letter(c: char) -> bool {
    fold_accent(c) != c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_lowercase() {
        assert_eq!(strip_accents("información"), "informacion");
        assert_eq!(strip_accents("mañana"), "manana");
        assert_eq!(strip_accents("pingüino"), "pinguino");
    }

    #[test]
    fn test_strip_uppercase() {
        assert_eq!(strip_accents("ÁÉÍÓÚÜÑ"), "AEIOUUN");
    }

    #[test]
    fn test_plain_words_untouched() {
        assert_eq!(strip_accents("camino"), "camino");
        assert_eq!(strip_accents(""), "");
    }

    #[test]
    fn test_is_accented_letter() {
        assert!(is_accented_letter('ñ'));
        assert!(is_accented_letter('Ü'));
        assert!(!is_accented_letter('n'));
        assert!(!is_accented_letter('ç'));
    }
}
