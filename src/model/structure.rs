// src/model/structure.rs

use crate::error::ModelError;
use crate::model::composition::Composition;
use crate::model::dict::{self, PeriodicSiteDict, StructureDict};
use crate::model::elements;
use crate::model::lattice::Lattice;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct PeriodicSite {
    pub species: String,
    /// Position as fractions of the lattice vectors.
    pub frac_coords: [f64; 3],
    pub label: String,
}

/// Crystal structure: a lattice plus the sites of one unit cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    lattice: Lattice,
    sites: Vec<PeriodicSite>,
    charge: i32,
}

impl Structure {
    pub fn new<S: AsRef<str>>(
        lattice: Lattice,
        species: &[S],
        frac_coords: &[[f64; 3]],
    ) -> Result<Self, ModelError> {
        if species.len() != frac_coords.len() {
            return Err(ModelError::LengthMismatch {
                species: species.len(),
                coords: frac_coords.len(),
            });
        }

        let sites = species
            .iter()
            .zip(frac_coords)
            .map(|(sp, abc)| {
                let sp = sp.as_ref();
                PeriodicSite {
                    species: sp.to_string(),
                    frac_coords: *abc,
                    label: sp.to_string(),
                }
            })
            .collect();

        Self::from_sites(lattice, sites, 0)
    }

    fn from_sites(
        lattice: Lattice,
        sites: Vec<PeriodicSite>,
        charge: i32,
    ) -> Result<Self, ModelError> {
        for site in &sites {
            if !elements::is_known(&site.species) {
                return Err(ModelError::UnknownSpecies(site.species.clone()));
            }
            if site.frac_coords.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::NonFinite("frac_coords"));
            }
        }
        Ok(Self { lattice, sites, charge })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn sites(&self) -> &[PeriodicSite] {
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

    pub fn cart_coords(&self) -> Vec<[f64; 3]> {
        self.sites
            .iter()
            .map(|s| self.lattice.frac_to_cart(s.frac_coords))
            .collect()
    }

    pub fn composition(&self) -> Composition {
        Composition::from_species(self.sites.iter().map(|s| s.species.as_str()))
    }

    pub fn to_dict(&self) -> StructureDict {
        StructureDict {
            module: dict::MODULE.to_string(),
            class: "Structure".to_string(),
            charge: self.charge,
            lattice: self.lattice.to_dict(),
            sites: self
                .sites
                .iter()
                .map(|s| PeriodicSiteDict {
                    species: dict::species_entry(&s.species),
                    abc: s.frac_coords,
                    xyz: self.lattice.frac_to_cart(s.frac_coords),
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

    /// Rebuild from the exchange representation. Sites are read from their
    /// fractional coordinates; `xyz` is informational only.
    pub fn from_dict(value: &Value) -> Result<Self, ModelError> {
        let d = StructureDict::deserialize(value)?;
        if d.class != "Structure" {
            return Err(ModelError::WrongClass {
                expected: "Structure",
                found: d.class,
            });
        }

        let lattice = Lattice::from_dict(&d.lattice)?;
        let mut sites = Vec::with_capacity(d.sites.len());
        for site in d.sites {
            let species = dict::ordered_element(&site.species)
                .ok_or(ModelError::InvalidField("species"))?
                .to_string();
            let label = site.label.unwrap_or_else(|| species.clone());
            sites.push(PeriodicSite {
                species,
                frac_coords: site.abc,
                label,
            });
        }

        Self::from_sites(lattice, sites, d.charge)
    }
}
