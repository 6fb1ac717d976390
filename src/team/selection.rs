//! Ways of choosing which species make up a new team.

use super::{MonsterTeam, TeamOptions};
use crate::errors::{TeamError, TeamResult};
use crate::species::{Species, SpeciesTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};

/// How a team's roster is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Random size in `1..=limit`, each member drawn uniformly from the
    /// spawnable species.
    #[default]
    Random,
    /// Prompt on stdin/stdout.
    Manual,
    /// A fixed roster, in insertion order.
    Provided(Vec<Species>),
}

/// Build a team of fresh monsters using `selection` to choose the roster.
pub fn spawn_team<R: Rng + ?Sized>(
    options: TeamOptions,
    selection: &Selection,
    table: &SpeciesTable,
    rng: &mut R,
) -> TeamResult<MonsterTeam> {
    let roster = match selection {
        Selection::Random => random_roster(table, options.limit, rng)?,
        Selection::Provided(species) => species.clone(),
        Selection::Manual => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            manual_roster(table, options.limit, &mut stdin.lock(), &mut stdout.lock())?
        }
    };
    log::debug!("spawning {} team with {:?}", options.mode, roster);
    MonsterTeam::from_species(options, &roster, table)
}

/// Draw a random roster of `1..=limit` spawnable species.
pub fn random_roster<R: Rng + ?Sized>(
    table: &SpeciesTable,
    limit: usize,
    rng: &mut R,
) -> TeamResult<Vec<Species>> {
    let spawnable = table.list_spawnable_species();
    if spawnable.is_empty() {
        return Err(TeamError::InvalidConfiguration(
            "no spawnable species to choose from".to_string(),
        ));
    }
    if limit == 0 {
        return Err(TeamError::InvalidConfiguration(
            "team limit must be at least 1".to_string(),
        ));
    }

    let size = rng.random_range(1..=limit);
    Ok((0..size)
        .map(|_| spawnable[rng.random_range(0..spawnable.len())])
        .collect())
}

/// Ask for a team size, then for each member a 1-based index into the
/// species table. Invalid answers are reported and asked again.
pub fn manual_roster<R: BufRead, W: Write>(
    table: &SpeciesTable,
    limit: usize,
    input: &mut R,
    output: &mut W,
) -> TeamResult<Vec<Species>> {
    let size = loop {
        match prompt_number(input, output, "How many monsters are there?")? {
            Some(size) if (1..=limit).contains(&size) => break size,
            _ => writeln!(
                output,
                "Invalid input. Please choose a team size between 1 and {}",
                limit
            )
            .map_err(input_error)?,
        }
    };

    for (position, data) in table.iter().enumerate() {
        let marker = if data.spawnable { "+" } else { "-" };
        writeln!(output, "{:>2}: {} [{}]", position + 1, data.species, marker)
            .map_err(input_error)?;
    }

    let mut roster = Vec::with_capacity(size);
    while roster.len() < size {
        let choice = prompt_number(input, output, "Which monster are you spawning?")?;
        let entry = choice
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| table.iter().nth(index));
        match entry {
            Some(data) if data.spawnable => roster.push(data.species),
            Some(_) => writeln!(output, "This monster cannot be spawned.").map_err(input_error)?,
            None => writeln!(output, "Invalid input. Please choose a listed monster.")
                .map_err(input_error)?,
        }
    }
    Ok(roster)
}

// Ok(None) for a line that is not a number; an error once input runs out.
fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> TeamResult<Option<usize>> {
    writeln!(output, "{}", prompt).map_err(input_error)?;
    output.flush().map_err(input_error)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(input_error)?;
    if read == 0 {
        return Err(TeamError::Input(
            "input ended before the team was complete".to_string(),
        ));
    }
    Ok(line.trim().parse().ok())
}

fn input_error(err: io::Error) -> TeamError {
    TeamError::Input(err.to_string())
}
