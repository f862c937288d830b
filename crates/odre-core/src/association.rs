//! Attribution of a reconstructed path's ends to substations.
//!
//! Line ids of the source dataset embed both substation codes at fixed positions:
//! the first five characters and everything from the ninth character on, each
//! trimmed (`"CAIN  L1RAMBO"` names `CAIN` and `RAMBO`).

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::distance::distance_between;
use crate::error::{OdreError, OdreResult};
use crate::{Coordinate, SubstationGeoData};

const FIRST_CODE_LEN: usize = 5;
const SECOND_CODE_START: usize = 8;

/// How the two ends of a line were attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationOutcome {
    /// Both candidates found, each nearest to a different end
    Resolved,
    /// One candidate found and placed on its nearest end
    Partial { missing: String },
    /// Neither candidate is a known substation
    NoneFound,
    /// Both candidates found but the same one is nearest to both ends
    Ambiguous { nearest: String },
}

/// Start and end substation ids; empty strings mean undetermined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstationPair {
    pub start: String,
    pub end: String,
    pub outcome: AssociationOutcome,
}

impl SubstationPair {
    fn unassigned(outcome: AssociationOutcome) -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            outcome,
        }
    }
}

/// Slice the two candidate substation codes out of a line id.
pub fn substation_codes(line_id: &str) -> OdreResult<(String, String)> {
    if line_id.chars().count() < SECOND_CODE_START {
        return Err(OdreError::ShortIdentifier(line_id.to_string()));
    }
    let first: String = line_id.chars().take(FIRST_CODE_LEN).collect();
    let second: String = line_id.chars().skip(SECOND_CODE_START).collect();
    Ok((first.trim().to_string(), second.trim().to_string()))
}

/// Decide which candidate substation sits at the start and which at the end of `path`.
///
/// Fails only when the id is too short to slice or the path is empty. Unresolved
/// ends are reported through [`AssociationOutcome`], not as errors.
pub fn associate_substations(
    substations: &BTreeMap<String, SubstationGeoData>,
    line_id: &str,
    path: &[Coordinate],
) -> OdreResult<SubstationPair> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Err(OdreError::Validation(format!("line {line_id} has no coordinates")));
    };
    let (code_a, code_b) = substation_codes(line_id)?;

    let pair = match (substations.get(&code_a), substations.get(&code_b)) {
        (None, None) => {
            warn!("can't find any substation for {}", line_id);
            SubstationPair::unassigned(AssociationOutcome::NoneFound)
        }
        (Some(a), Some(b)) => {
            let a_start = distance_between(&a.coordinate, first);
            let b_start = distance_between(&b.coordinate, first);
            let a_end = distance_between(&a.coordinate, last);
            let b_end = distance_between(&b.coordinate, last);
            let a_nearest_start = a_start < b_start;
            let a_nearest_end = a_end < b_end;
            if a_nearest_start == a_nearest_end {
                let nearest = if a_nearest_start { &code_a } else { &code_b };
                error!(
                    "line {} for substations {} and {} has both first and last coordinate nearest to {}",
                    line_id, code_a, code_b, nearest
                );
                SubstationPair::unassigned(AssociationOutcome::Ambiguous {
                    nearest: nearest.clone(),
                })
            } else if a_nearest_start {
                SubstationPair {
                    start: code_a,
                    end: code_b,
                    outcome: AssociationOutcome::Resolved,
                }
            } else {
                SubstationPair {
                    start: code_b,
                    end: code_a,
                    outcome: AssociationOutcome::Resolved,
                }
            }
        }
        (Some(found), None) => place_single(line_id, code_a, found, code_b, first, last),
        (None, Some(found)) => place_single(line_id, code_b, found, code_a, first, last),
    };
    Ok(pair)
}

fn place_single(
    line_id: &str,
    code: String,
    found: &SubstationGeoData,
    missing: String,
    first: &Coordinate,
    last: &Coordinate,
) -> SubstationPair {
    let at_start =
        distance_between(&found.coordinate, first) < distance_between(&found.coordinate, last);
    debug!(
        "line {}: only {} is known, placed at the {}",
        line_id,
        code,
        if at_start { "start" } else { "end" }
    );
    let outcome = AssociationOutcome::Partial { missing };
    if at_start {
        SubstationPair {
            start: code,
            end: String::new(),
            outcome,
        }
    } else {
        SubstationPair {
            start: String::new(),
            end: code,
            outcome,
        }
    }
}
