// src/bench/mod.rs
//
// Timing harness. Each phase runs `iterations` times inside a single
// wall-clock window; the next phase works on whatever the last iteration of
// the previous phase produced.

pub mod inputs;
pub mod report;

use crate::error::{BenchError, ModelError};
use crate::model::{Lattice, Molecule, Structure};
use inputs::{MoleculeSpec, StructureSpec};
use report::{Entity, Phase, PhaseReport, LIBRARY};
use std::hint::black_box;
use std::time::Instant;

/// Rejects inputs the runner cannot time: zero counts, or a scale whose
/// atom count does not fit in `usize`.
pub fn validate(iterations: usize, scale: usize) -> Result<(), BenchError> {
    if iterations == 0 {
        return Err(BenchError::InvalidArgument(
            "iterations must be at least 1".to_string(),
        ));
    }
    if scale == 0 {
        return Err(BenchError::InvalidArgument(
            "scale must be at least 1".to_string(),
        ));
    }
    if scale.checked_mul(3).is_none() {
        return Err(BenchError::InvalidArgument(format!(
            "scale {} is too large",
            scale
        )));
    }
    Ok(())
}

/// Runs `op` `iterations` times and returns the last result with the mean
/// seconds per call.
fn time_phase<T>(
    iterations: usize,
    mut op: impl FnMut() -> Result<T, ModelError>,
) -> Result<(T, f64), BenchError> {
    let start = Instant::now();
    let mut last = None;
    for _ in 0..iterations {
        last = Some(black_box(op()?));
    }
    let elapsed = start.elapsed().as_secs_f64();

    let last = last.ok_or_else(|| {
        BenchError::InvalidArgument("iterations must be at least 1".to_string())
    })?;
    Ok((last, elapsed / iterations as f64))
}

fn phase_report(
    entity: Entity,
    phase: Phase,
    atoms: usize,
    iterations: usize,
    secs: f64,
) -> PhaseReport {
    log::debug!("{} {} done: {:.3e} s/iter", entity, phase, secs);
    PhaseReport {
        library: LIBRARY,
        entity,
        phase,
        atoms,
        iterations,
        seconds_per_iteration: secs,
    }
}

pub fn benchmark_molecule_creation(
    iterations: usize,
    scale: usize,
) -> Result<Vec<PhaseReport>, BenchError> {
    validate(iterations, scale)?;
    let spec = MoleculeSpec::water(scale);
    let atoms = spec.num_atoms();
    log::info!("Molecule benchmark: {} atoms, {} iterations", atoms, iterations);

    let (molecule, create) = time_phase(iterations, || {
        Molecule::new(&spec.species, &spec.coords)
    })?;
    log::debug!("Built molecule {}", molecule.composition().formula());

    let (dict, serialize) = time_phase(iterations, || molecule.as_dict())?;
    let (_, deserialize) = time_phase(iterations, || Molecule::from_dict(&dict))?;

    Ok(vec![
        phase_report(Entity::Molecule, Phase::Creation, atoms, iterations, create),
        phase_report(Entity::Molecule, Phase::Serialization, atoms, iterations, serialize),
        phase_report(Entity::Molecule, Phase::Deserialization, atoms, iterations, deserialize),
    ])
}

pub fn benchmark_crystal_structure_creation(
    iterations: usize,
    scale: usize,
) -> Result<Vec<PhaseReport>, BenchError> {
    validate(iterations, scale)?;
    let spec = StructureSpec::rock_salt(scale);
    let atoms = spec.num_atoms();
    log::info!("Structure benchmark: {} atoms, {} iterations", atoms, iterations);

    let lattice = Lattice::new(spec.lattice)?;
    let (structure, create) = time_phase(iterations, || {
        Structure::new(lattice.clone(), &spec.species, &spec.frac_coords)
    })?;
    log::debug!(
        "Built structure {} (V = {:.3} A^3)",
        structure.composition().formula(),
        structure.lattice().volume()
    );

    let (dict, serialize) = time_phase(iterations, || structure.as_dict())?;
    let (_, deserialize) = time_phase(iterations, || Structure::from_dict(&dict))?;

    Ok(vec![
        phase_report(Entity::Structure, Phase::Creation, atoms, iterations, create),
        phase_report(Entity::Structure, Phase::Serialization, atoms, iterations, serialize),
        phase_report(Entity::Structure, Phase::Deserialization, atoms, iterations, deserialize),
    ])
}
