// src/bench/report.rs

use serde::Serialize;
use std::fmt;

/// Label printed in front of every result line.
pub const LIBRARY: &str = "Matbench";

/// Most decimals an f64 can carry meaningfully.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Entity {
    Molecule,
    Structure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Creation,
    Serialization,
    Deserialization,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Molecule => "Molecule",
            Entity::Structure => "Structure",
        })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Creation => "Creation",
            Phase::Serialization => "Serialization",
            Phase::Deserialization => "Deserialization",
        })
    }
}

/// Averaged timing of one benchmark phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    pub library: &'static str,
    pub entity: Entity,
    pub phase: Phase,
    pub atoms: usize,
    pub iterations: usize,
    pub seconds_per_iteration: f64,
}

impl PhaseReport {
    /// Text line with `precision` decimals, capped at `MAX_PRECISION`.
    pub fn render(&self, precision: usize) -> String {
        format!(
            "{} {} {} ({} atoms {} iterations): {:.prec$} seconds/iteration",
            self.library,
            self.entity,
            self.phase,
            self.atoms,
            self.iterations,
            self.seconds_per_iteration,
            prec = precision.min(MAX_PRECISION)
        )
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(6))
    }
}
