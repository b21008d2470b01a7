use super::atom::Atom;
use crate::core::utils::geometry;
use nalgebra::{Point3, Vector3};

/// Represents a molecular structure as a flat collection of atoms.
///
/// A `Molecule` holds one 3D arrangement of a chemical structure, i.e. one
/// conformer. It carries no bond topology: the inertia analysis only needs
/// masses and positions, with hydrogens retained like every other atom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
}

impl Molecule {
    /// Creates an empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a molecule from an existing atom list.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Appends an atom to the molecule.
    pub fn push_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Returns the atoms of the molecule in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the molecule has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the total mass of the molecule in unified atomic mass units.
    ///
    /// Atoms whose element symbol is missing from the mass table contribute
    /// zero mass; parsing rejects such symbols before a `Molecule` reaches
    /// the analysis layer.
    pub fn total_mass(&self) -> f64 {
        self.atoms
            .iter()
            .map(|atom| atom.mass().unwrap_or(0.0))
            .sum()
    }

    /// Computes the mass-weighted center of mass.
    ///
    /// # Return
    ///
    /// Returns `None` when the molecule is empty or its total mass vanishes,
    /// in which case no center of mass is defined.
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        geometry::center_of_mass(&self.mass_points())
    }

    /// Computes the three principal moments of inertia about the center of
    /// mass, in ascending order, in amu·Å².
    ///
    /// All atoms enter the inertia tensor, hydrogens explicitly included.
    ///
    /// # Return
    ///
    /// Returns `None` when the molecule has no defined center of mass.
    pub fn principal_moments(&self) -> Option<Vector3<f64>> {
        geometry::principal_moments(&self.mass_points())
    }

    fn mass_points(&self) -> Vec<(f64, Point3<f64>)> {
        self.atoms
            .iter()
            .map(|atom| (atom.mass().unwrap_or(0.0), atom.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h2_along_x() -> Molecule {
        Molecule::from_atoms(vec![
            Atom::new("H", Point3::new(-1.0, 0.0, 0.0)),
            Atom::new("H", Point3::new(1.0, 0.0, 0.0)),
        ])
    }

    #[test]
    fn total_mass_sums_atomic_masses() {
        let mol = h2_along_x();
        let h_mass = Atom::new("H", Point3::origin()).mass().unwrap();
        assert!((mol.total_mass() - 2.0 * h_mass).abs() < 1e-12);
    }

    #[test]
    fn center_of_mass_of_symmetric_pair_is_midpoint() {
        let com = h2_along_x().center_of_mass().unwrap();
        assert!(com.coords.norm() < 1e-12);
    }

    #[test]
    fn center_of_mass_is_none_for_empty_molecule() {
        assert!(Molecule::new().center_of_mass().is_none());
    }

    #[test]
    fn principal_moments_of_diatomic_match_analytic_values() {
        let mol = h2_along_x();
        let h_mass = Atom::new("H", Point3::origin()).mass().unwrap();
        let moments = mol.principal_moments().unwrap();

        // A diatomic along x: zero moment about the bond axis, 2*m*r^2 about
        // the two perpendicular axes.
        assert!(moments[0].abs() < 1e-9);
        assert!((moments[1] - 2.0 * h_mass).abs() < 1e-9);
        assert!((moments[2] - 2.0 * h_mass).abs() < 1e-9);
    }

    #[test]
    fn single_atom_has_zero_moments() {
        let mol = Molecule::from_atoms(vec![Atom::new("C", Point3::new(3.0, -2.0, 7.0))]);
        let moments = mol.principal_moments().unwrap();
        assert!(moments.iter().all(|m| m.abs() < 1e-9));
    }
}
