use phf::{Map, phf_map};

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7,
    "O" => 8, "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13,
    "Si" => 14, "P" => 15, "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19,
    "Ca" => 20, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29,
    "Zn" => 30, "Se" => 34, "Br" => 35, "Mo" => 42, "I" => 53,
};

static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H" => 1.008, "He" => 4.003, "Li" => 6.941, "Be" => 9.012, "B" => 10.811,
    "C" => 12.011, "N" => 14.007, "O" => 15.999, "F" => 18.998, "Ne" => 20.180,
    "Na" => 22.990, "Mg" => 24.305, "Al" => 26.982, "Si" => 28.086,
    "P" => 30.974, "S" => 32.065, "Cl" => 35.453, "Ar" => 39.948,
    "K" => 39.098, "Ca" => 40.078, "Mn" => 54.938, "Fe" => 55.845,
    "Co" => 58.933, "Ni" => 58.693, "Cu" => 63.546, "Zn" => 65.38,
    "Se" => 78.96, "Br" => 79.904, "Mo" => 95.96, "I" => 126.904,
};

pub fn atomic_number(symbol: &str) -> Option<u8> {
    ATOMIC_NUMBERS.get(symbol.trim()).copied()
}

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES.get(symbol.trim()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_number_resolves_common_elements() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("N"), Some(7));
        assert_eq!(atomic_number("O"), Some(8));
        assert_eq!(atomic_number("S"), Some(16));
    }

    #[test]
    fn atomic_number_trims_whitespace_and_is_case_sensitive() {
        assert_eq!(atomic_number(" C "), Some(6));
        assert_eq!(atomic_number("c"), None);
        assert_eq!(atomic_number("CL"), None);
        assert_eq!(atomic_number("Cl"), Some(17));
    }

    #[test]
    fn atomic_number_returns_none_for_unknown_symbols() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number(""), None);
    }

    #[test]
    fn atomic_mass_resolves_common_elements() {
        assert_eq!(atomic_mass("C"), Some(12.011));
        assert_eq!(atomic_mass("H"), Some(1.008));
        assert_eq!(atomic_mass("Fe"), Some(55.845));
    }

    #[test]
    fn atomic_mass_returns_none_for_unknown_symbols() {
        assert_eq!(atomic_mass("Qq"), None);
    }
}
