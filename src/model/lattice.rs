// src/model/lattice.rs

use crate::error::ModelError;
use crate::model::dict::LatticeDict;
use nalgebra::{Matrix3, Vector3};

/// Periodic cell, stored as row vectors [[ax, ay, az], [bx, by, bz], [cx, cy, cz]] in Angstroms.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
  matrix: [[f64; 3]; 3],
}

impl Lattice {
  pub fn new(matrix: [[f64; 3]; 3]) -> Result<Self, ModelError> {
    if matrix.iter().flatten().any(|v| !v.is_finite()) {
      return Err(ModelError::NonFinite("lattice"));
    }
    if to_matrix3(&matrix).determinant().abs() < 1e-8 {
      return Err(ModelError::SingularLattice);
    }
    Ok(Self { matrix })
  }

  pub fn cubic(a: f64) -> Result<Self, ModelError> {
    Self::new([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]])
  }

  pub fn matrix(&self) -> [[f64; 3]; 3] {
    self.matrix
  }

  /// Lengths of the three cell vectors.
  pub fn abc(&self) -> [f64; 3] {
    let [a, b, c] = self.vectors();
    [a.norm(), b.norm(), c.norm()]
  }

  /// Cell angles (alpha, beta, gamma) in degrees.
  pub fn angles(&self) -> [f64; 3] {
    let [a, b, c] = self.vectors();
    [
      b.angle(&c).to_degrees(),
      a.angle(&c).to_degrees(),
      a.angle(&b).to_degrees(),
    ]
  }

  pub fn volume(&self) -> f64 {
    to_matrix3(&self.matrix).determinant().abs()
  }

  /// Convert fractional coordinates to Cartesian
  ///
  /// # Formula
  /// ```text
  /// Cartesian = Lattice^T × Fractional
  /// ```
  pub fn frac_to_cart(&self, frac: [f64; 3]) -> [f64; 3] {
    let cart = to_matrix3(&self.matrix).transpose() * Vector3::from(frac);
    [cart.x, cart.y, cart.z]
  }

  /// Convert Cartesian coordinates to fractional
  ///
  /// # Formula
  /// ```text
  /// Fractional = (Lattice^T)^-1 × Cartesian
  /// ```
  pub fn cart_to_frac(&self, cart: [f64; 3]) -> Option<[f64; 3]> {
    let inv = to_matrix3(&self.matrix).transpose().try_inverse()?;
    let frac = inv * Vector3::from(cart);
    Some([frac.x, frac.y, frac.z])
  }

  pub fn to_dict(&self) -> LatticeDict {
    let [a, b, c] = self.abc();
    let [alpha, beta, gamma] = self.angles();
    LatticeDict {
      matrix: self.matrix,
      pbc: [true; 3],
      a,
      b,
      c,
      alpha,
      beta,
      gamma,
      volume: self.volume(),
    }
  }

  pub fn from_dict(dict: &LatticeDict) -> Result<Self, ModelError> {
    Self::new(dict.matrix)
  }

  fn vectors(&self) -> [Vector3<f64>; 3] {
    [
      Vector3::from(self.matrix[0]),
      Vector3::from(self.matrix[1]),
      Vector3::from(self.matrix[2]),
    ]
  }
}

fn to_matrix3(m: &[[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::new(
    m[0][0], m[0][1], m[0][2],
    m[1][0], m[1][1], m[1][2],
    m[2][0], m[2][1], m[2][2],
  )
}
