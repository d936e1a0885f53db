use std::io::{self, Write};

use popdyn_core::{Identifier, Trajectory};

/// Writes `step,time` followed by one column per species.
pub(crate) fn write_trajectory<S: Identifier>(
    out: &mut impl Write,
    trajectory: &Trajectory<S>,
) -> io::Result<()> {
    write!(out, "step,time")?;
    for species in S::ALL {
        write!(out, ",{}", species.name())?;
    }
    writeln!(out)?;

    for (step, (time, state)) in trajectory
        .time_axis()
        .into_iter()
        .zip(trajectory.snapshots())
        .enumerate()
    {
        write!(out, "{step},{time}")?;
        for value in state.values() {
            write!(out, ",{value}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes one species from two runs of equal length side by side.
pub(crate) fn write_comparison<S: Identifier>(
    out: &mut impl Write,
    species: S,
    base: &Trajectory<S>,
    perturbed: &Trajectory<S>,
) -> io::Result<()> {
    let name = species.name();
    writeln!(out, "step,time,{name}_base,{name}_perturbed")?;

    let rows = base
        .time_axis()
        .into_iter()
        .zip(base.series(species))
        .zip(perturbed.series(species))
        .enumerate();
    for (step, ((time, before), after)) in rows {
        writeln!(out, "{step},{time},{before},{after}")?;
    }
    Ok(())
}
