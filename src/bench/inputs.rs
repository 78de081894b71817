// src/bench/inputs.rs

/// Rock-salt cell edge in Angstroms.
pub const NACL_EDGE: f64 = 5.64;

/// Raw molecule input: water repeated `scale` times.
#[derive(Clone, Debug, PartialEq)]
pub struct MoleculeSpec {
    pub species: Vec<String>,
    pub coords: Vec<[f64; 3]>,
}

impl MoleculeSpec {
    pub fn water(scale: usize) -> Self {
        let species = ["H", "H", "O"]
            .iter()
            .cycle()
            .take(3 * scale)
            .map(|s| s.to_string())
            .collect();
        let coords = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]
            .iter()
            .cycle()
            .take(3 * scale)
            .copied()
            .collect();
        Self { species, coords }
    }

    pub fn num_atoms(&self) -> usize {
        self.species.len()
    }
}

/// Raw structure input: a rock-salt column stretched `scale` cells along c.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureSpec {
    pub lattice: [[f64; 3]; 3],
    pub species: Vec<String>,
    pub frac_coords: Vec<[f64; 3]>,
}

impl StructureSpec {
    pub fn rock_salt(scale: usize) -> Self {
        let lattice = [
            [NACL_EDGE, 0.0, 0.0],
            [0.0, NACL_EDGE, 0.0],
            [0.0, 0.0, NACL_EDGE * scale as f64],
        ];

        let mut species = vec!["Na".to_string(); scale];
        species.extend(vec!["Cl".to_string(); scale]);

        let n = scale as f64;
        let frac_coords = (0..scale)
            .map(|i| [0.0, 0.0, i as f64 / n])
            .chain((0..scale).map(|i| [0.0, 0.0, (i as f64 + 0.5) / n]))
            .collect();

        Self { lattice, species, frac_coords }
    }

    pub fn num_atoms(&self) -> usize {
        self.species.len()
    }
}
