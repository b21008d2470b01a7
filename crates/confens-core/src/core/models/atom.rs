use crate::core::utils::elements;
use nalgebra::Point3;

/// Represents a single atom in a molecular structure.
///
/// This struct pairs an element symbol with a 3D position. It is the smallest
/// unit the analysis operates on; masses are resolved lazily through the
/// static element table so that an `Atom` stays a plain value type.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The canonical element symbol (e.g. "C", "H", "Cl").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    ///
    /// The symbol is canonicalized (first letter uppercase, rest lowercase) so
    /// that symbols read from differently-cased structure files compare equal.
    ///
    /// # Arguments
    ///
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: elements::canonical_symbol(element),
            position,
        }
    }

    /// Returns the standard atomic mass of this atom in unified atomic mass
    /// units, or `None` if the element symbol is not in the mass table.
    pub fn mass(&self) -> Option<f64> {
        elements::atomic_mass(&self.element)
    }

    /// Returns `true` if this atom is a hydrogen (or deuterium/tritium label).
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.as_str(), "H" | "D" | "T")
    }
}
