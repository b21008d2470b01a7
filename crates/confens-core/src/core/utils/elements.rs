use phf::{Map, phf_map};

// CIAAW standard atomic weights, abridged to the elements that show up in
// conformer ensembles of organic and organometallic molecules.
#[rustfmt::skip]
static ATOMIC_MASSES: Map<&'static str, f64> = phf_map! {
    "H"  => 1.008,       "He" => 4.002602,
    "Li" => 6.94,        "Be" => 9.0121831,   "B"  => 10.81,      "C"  => 12.011,
    "N"  => 14.007,      "O"  => 15.999,      "F"  => 18.998403,  "Ne" => 20.1797,
    "Na" => 22.98976928, "Mg" => 24.305,      "Al" => 26.9815385, "Si" => 28.085,
    "P"  => 30.973762,   "S"  => 32.06,       "Cl" => 35.45,      "Ar" => 39.948,
    "K"  => 39.0983,     "Ca" => 40.078,      "Sc" => 44.955908,  "Ti" => 47.867,
    "V"  => 50.9415,     "Cr" => 51.9961,     "Mn" => 54.938044,  "Fe" => 55.845,
    "Co" => 58.933194,   "Ni" => 58.6934,     "Cu" => 63.546,     "Zn" => 65.38,
    "Ga" => 69.723,      "Ge" => 72.630,      "As" => 74.921595,  "Se" => 78.971,
    "Br" => 79.904,      "Kr" => 83.798,
    "Rb" => 85.4678,     "Sr" => 87.62,       "Mo" => 95.95,      "Ru" => 101.07,
    "Rh" => 102.90550,   "Pd" => 106.42,      "Ag" => 107.8682,   "Cd" => 112.414,
    "Sn" => 118.710,     "Sb" => 121.760,     "Te" => 127.60,     "I"  => 126.90447,
    "Xe" => 131.293,     "Cs" => 132.90545196,"Ba" => 137.327,    "W"  => 183.84,
    "Ir" => 192.217,     "Pt" => 195.084,     "Au" => 196.966569, "Hg" => 200.592,
    "Tl" => 204.38,      "Pb" => 207.2,       "Bi" => 208.98040,
};

/// Canonicalizes an element symbol: first letter uppercase, remainder
/// lowercase, surrounding whitespace removed.
pub fn canonical_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => {
            let mut canonical = first.to_ascii_uppercase().to_string();
            canonical.extend(chars.map(|c| c.to_ascii_lowercase()));
            canonical
        }
        None => String::new(),
    }
}

/// Looks up the standard atomic mass for an element symbol, in unified
/// atomic mass units. The symbol is canonicalized before lookup.
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ATOMIC_MASSES.get(canonical_symbol(symbol).as_str()).copied()
}

/// Returns `true` if the symbol names an element known to the mass table.
pub fn is_known_element(symbol: &str) -> bool {
    ATOMIC_MASSES.contains_key(canonical_symbol(symbol).as_str())
}
