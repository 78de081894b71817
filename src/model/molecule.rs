// src/model/molecule.rs

use crate::error::ModelError;
use crate::model::composition::Composition;
use crate::model::dict::{self, MoleculeDict, SiteDict};
use crate::model::elements;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub species: String,
    /// Cartesian position in Angstroms.
    pub coords: [f64; 3],
    pub label: String,
}

/// Non-periodic collection of sites with a total charge and spin multiplicity.
#[derive(Clone, Debug, PartialEq)]
pub struct Molecule {
    sites: Vec<Site>,
    charge: i32,
    spin_multiplicity: u32,
}

impl Molecule {
    /// Neutral molecule with the default spin multiplicity.
    pub fn new<S: AsRef<str>>(species: &[S], coords: &[[f64; 3]]) -> Result<Self, ModelError> {
        Self::with_charge(species, coords, 0, None)
    }

    pub fn with_charge<S: AsRef<str>>(
        species: &[S],
        coords: &[[f64; 3]],
        charge: i32,
        spin_multiplicity: Option<u32>,
    ) -> Result<Self, ModelError> {
        if species.len() != coords.len() {
            return Err(ModelError::LengthMismatch {
                species: species.len(),
                coords: coords.len(),
            });
        }

        let sites = species
            .iter()
            .zip(coords)
            .map(|(sp, xyz)| {
                let sp = sp.as_ref();
                Site {
                    species: sp.to_string(),
                    coords: *xyz,
                    label: sp.to_string(),
                }
            })
            .collect();

        Self::from_sites(sites, charge, spin_multiplicity)
    }

    fn from_sites(
        sites: Vec<Site>,
        charge: i32,
        spin_multiplicity: Option<u32>,
    ) -> Result<Self, ModelError> {
        let mut protons: i64 = 0;
        for site in &sites {
            let z = elements::atomic_number(&site.species)
                .ok_or_else(|| ModelError::UnknownSpecies(site.species.clone()))?;
            if site.coords.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::NonFinite("coords"));
            }
            protons += i64::from(z);
        }

        let nelectrons = protons - i64::from(charge);
        let spin_multiplicity = match spin_multiplicity {
            None => {
                if nelectrons.rem_euclid(2) == 0 { 1 } else { 2 }
            }
            Some(mult) => {
                // Even electron count needs odd multiplicity and vice versa.
                if (nelectrons + i64::from(mult)).rem_euclid(2) != 1 {
                    return Err(ModelError::SpinCharge {
                        charge,
                        spin_multiplicity: mult,
                    });
                }
                mult
            }
        };

        Ok(Self {
            sites,
            charge,
            spin_multiplicity,
        })
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn spin_multiplicity(&self) -> u32 {
        self.spin_multiplicity
    }

    pub fn composition(&self) -> Composition {
        Composition::from_species(self.sites.iter().map(|s| s.species.as_str()))
    }

    pub fn to_dict(&self) -> MoleculeDict {
        MoleculeDict {
            module: dict::MODULE.to_string(),
            class: "Molecule".to_string(),
            charge: self.charge,
            spin_multiplicity: Some(self.spin_multiplicity),
            sites: self
                .sites
                .iter()
                .map(|s| SiteDict {
                    name: s.species.clone(),
                    species: dict::species_entry(&s.species),
                    xyz: s.coords,
                    properties: Map::new(),
                    label: Some(s.label.clone()),
                })
                .collect(),
            properties: Map::new(),
        }
    }

    /// Flatten into the exchange representation.
    pub fn as_dict(&self) -> Result<Value, ModelError> {
        Ok(serde_json::to_value(self.to_dict())?)
    }

    /// Rebuild from the exchange representation, re-running construction checks.
    pub fn from_dict(value: &Value) -> Result<Self, ModelError> {
        let d = MoleculeDict::deserialize(value)?;
        if d.class != "Molecule" {
            return Err(ModelError::WrongClass {
                expected: "Molecule",
                found: d.class,
            });
        }

        let mut sites = Vec::with_capacity(d.sites.len());
        for site in d.sites {
            let species = dict::ordered_element(&site.species)
                .ok_or(ModelError::InvalidField("species"))?
                .to_string();
            let label = site.label.unwrap_or_else(|| species.clone());
            sites.push(Site {
                species,
                coords: site.xyz,
                label,
            });
        }

        Self::from_sites(sites, d.charge, d.spin_multiplicity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        Molecule::new(
            &["H", "H", "O"],
            &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_default_spin() {
        let mol = water();
        assert_eq!(mol.len(), 3);
        assert!(!mol.is_empty());
        assert_eq!(mol.composition().reduced_formula(), "H2O");
        assert_eq!(mol.charge(), 0);
        assert_eq!(mol.spin_multiplicity(), 1);

        // OH radical: 9 electrons
        let oh = Molecule::new(&["O", "H"], &[[0.0, 0.0, 0.0], [0.0, 0.0, 0.97]]).unwrap();
        assert_eq!(oh.spin_multiplicity(), 2);
    }

    #[test]
    fn test_charge_spin_parity() {
        let coords = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.97]];

        let hydroxide = Molecule::with_charge(&["O", "H"], &coords, -1, Some(1)).unwrap();
        assert_eq!(hydroxide.spin_multiplicity(), 1);

        let err = Molecule::with_charge(&["O", "H"], &coords, 0, Some(1)).unwrap_err();
        assert!(matches!(err, ModelError::SpinCharge { charge: 0, spin_multiplicity: 1 }));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Molecule::new(&["H", "H"], &[[0.0; 3]]).unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { species: 2, coords: 1 }));
    }

    #[test]
    fn test_unknown_species() {
        let err = Molecule::new(&["Qq"], &[[0.0; 3]]).unwrap_err();
        assert!(matches!(err, ModelError::UnknownSpecies(ref s) if s == "Qq"));
    }

    #[test]
    fn test_dict_roundtrip() {
        let mol = water();
        let value = mol.as_dict().unwrap();

        assert_eq!(value["@class"], "Molecule");
        assert_eq!(value["sites"].as_array().unwrap().len(), 3);
        assert_eq!(value["sites"][2]["species"][0]["element"], "O");

        assert_eq!(Molecule::from_dict(&value).unwrap(), mol);
    }

    #[test]
    fn test_from_dict_wrong_class() {
        let mut value = water().as_dict().unwrap();
        value["@class"] = Value::from("Structure");

        let err = Molecule::from_dict(&value).unwrap_err();
        assert!(matches!(err, ModelError::WrongClass { expected: "Molecule", .. }));
    }

    #[test]
    fn test_from_dict_missing_sites() {
        let value = serde_json::json!({ "@module": dict::MODULE, "@class": "Molecule" });
        assert!(matches!(Molecule::from_dict(&value), Err(ModelError::Json(_))));
    }

    #[test]
    fn test_from_dict_without_labels() {
        let value = serde_json::json!({
            "@module": dict::MODULE,
            "@class": "Molecule",
            "sites": [
                { "species": [{ "element": "He", "occu": 1.0 }], "xyz": [0.0, 0.0, 0.0] }
            ]
        });
        let mol = Molecule::from_dict(&value).unwrap();

        assert_eq!(mol.sites()[0].label, "He");
        assert_eq!(mol.spin_multiplicity(), 1);
    }
}
