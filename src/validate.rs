//! Input validation: turns a caller-supplied, not-yet-trusted project
//! description into the [`Project`](crate::model::Project) the allocator
//! accepts. This is the only place malformed input is rejected; once a
//! `Project` exists, every downstream stage assumes it is well-formed.

use crate::model::{Demand, Media, Project, Rack};
use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

/// The on-wire project shape, as read from JSON before validation. Field
/// names match the CLI's input format.
#[derive(Clone, Debug, Deserialize)]
pub struct RawProject {
    pub racks: Vec<RawRack>,
    pub demands: Vec<RawDemand>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawRack {
    pub id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawDemand {
    pub src: String,
    pub dst: String,
    pub endpoint_type: String,
    pub count: i64,
}

/// Everything that can be wrong with a [`RawProject`]. Each variant names
/// the offending value so the CLI can report it without re-deriving context.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("demand entry references unknown rack `{0}`")]
    UnknownRack(String),
    #[error("rack id `{0}` is declared more than once")]
    DuplicateRackId(String),
    #[error("unrecognized endpoint_type `{0}`")]
    UnknownEndpointType(String),
    #[error("demand count must be positive, got {0}")]
    NonPositiveCount(i64),
    #[error("demand src and dst are both `{0}`: self-loops are not allowed")]
    SelfLoop(String),
    #[error("malformed project: {0}")]
    Malformed(String),
}

/// Validates `raw`, returning a [`Project`] the allocator can consume.
///
/// Checks, in order: no duplicate rack ids, every demand's `endpoint_type`
/// parses as a [`Media`], every demand's `count` is positive, every
/// demand's `src`/`dst` name a declared rack, and no demand is a self-loop.
pub fn validate(raw: RawProject) -> Result<Project, ValidationError> {
    if raw.racks.is_empty() {
        return Err(ValidationError::Malformed(
            "project declares no racks".to_string(),
        ));
    }

    let mut seen_racks = HashSet::new();
    for rack in &raw.racks {
        if !seen_racks.insert(rack.id.clone()) {
            return Err(ValidationError::DuplicateRackId(rack.id.clone()));
        }
    }

    let mut demands = Vec::with_capacity(raw.demands.len());
    for d in &raw.demands {
        let media = Media::from_str(&d.endpoint_type)
            .map_err(|_| ValidationError::UnknownEndpointType(d.endpoint_type.clone()))?;
        if d.count <= 0 {
            return Err(ValidationError::NonPositiveCount(d.count));
        }
        if d.src == d.dst {
            return Err(ValidationError::SelfLoop(d.src.clone()));
        }
        if !seen_racks.contains(&d.src) {
            return Err(ValidationError::UnknownRack(d.src.clone()));
        }
        if !seen_racks.contains(&d.dst) {
            return Err(ValidationError::UnknownRack(d.dst.clone()));
        }
        demands.push(Demand {
            src: d.src.clone(),
            dst: d.dst.clone(),
            media,
            count: d.count as u32,
        });
    }

    Ok(Project {
        racks: raw
            .racks
            .into_iter()
            .map(|r| Rack { id: r.id })
            .collect(),
        demands,
    })
}
