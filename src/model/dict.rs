// src/model/dict.rs
//
// Exchange representation: plain serde shapes that `as_dict` flattens model
// objects into and `from_dict` reads back. Only the fields needed to rebuild
// an object are required on the way in; derived values are written for
// readers but ignored on load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MODULE: &str = "matbench.model";

fn periodic() -> [bool; 3] {
    [true; 3]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesOccu {
    pub element: String,
    pub occu: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeDict {
    pub matrix: [[f64; 3]; 3],
    #[serde(default = "periodic")]
    pub pbc: [bool; 3],
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub c: f64,
    #[serde(default)]
    pub alpha: f64,
    #[serde(default)]
    pub beta: f64,
    #[serde(default)]
    pub gamma: f64,
    #[serde(default)]
    pub volume: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SiteDict {
    #[serde(default)]
    pub name: String,
    pub species: Vec<SpeciesOccu>,
    pub xyz: [f64; 3],
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PeriodicSiteDict {
    pub species: Vec<SpeciesOccu>,
    pub abc: [f64; 3],
    #[serde(default)]
    pub xyz: [f64; 3],
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoleculeDict {
    #[serde(rename = "@module")]
    pub module: String,
    #[serde(rename = "@class")]
    pub class: String,
    #[serde(default)]
    pub charge: i32,
    #[serde(default)]
    pub spin_multiplicity: Option<u32>,
    pub sites: Vec<SiteDict>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StructureDict {
    #[serde(rename = "@module")]
    pub module: String,
    #[serde(rename = "@class")]
    pub class: String,
    #[serde(default)]
    pub charge: i32,
    pub lattice: LatticeDict,
    pub sites: Vec<PeriodicSiteDict>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Single-element, fully occupied species entry.
pub fn species_entry(element: &str) -> Vec<SpeciesOccu> {
    vec![SpeciesOccu {
        element: element.to_string(),
        occu: 1.0,
    }]
}

/// Element of an ordered site. Disordered sites are not modelled.
pub fn ordered_element(species: &[SpeciesOccu]) -> Option<&str> {
    match species {
        [only] if (only.occu - 1.0).abs() < 1e-8 => Some(only.element.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_element() {
        assert_eq!(ordered_element(&species_entry("Na")), Some("Na"));
        assert_eq!(ordered_element(&[]), None);

        let partial = vec![SpeciesOccu { element: "Fe".into(), occu: 0.5 }];
        assert_eq!(ordered_element(&partial), None);
    }

    #[test]
    fn test_lattice_dict_minimal_input() {
        let value = serde_json::json!({
            "matrix": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        });
        let dict: LatticeDict = serde_json::from_value(value).unwrap();

        assert_eq!(dict.pbc, [true; 3]);
        assert_eq!(dict.volume, 0.0);
    }
}
