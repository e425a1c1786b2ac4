//! Request building.
//!
//! Turns a validated [`Query`] into the parameter set the prediction service
//! expects. Variants get a symmetric context window around their position.

use serde::Serialize;
use tracing::debug;

use crate::genome::{Interval, Organism, OutputType, Query, Variant};

/// Default half-width of the context window built around a variant.
pub const DEFAULT_FLANK: u64 = 500_000;

/// Parameters of one service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionRequest {
    Sequence {
        sequence: String,
        #[serde(serialize_with = "serialize_organism")]
        organism: Organism,
        ontology_terms: Vec<String>,
        requested_outputs: Vec<OutputType>,
    },
    Variant {
        interval: Interval,
        variant: Variant,
        #[serde(serialize_with = "serialize_organism")]
        organism: Organism,
        ontology_terms: Vec<String>,
        requested_outputs: Vec<OutputType>,
    },
    Interval {
        interval: Interval,
        #[serde(serialize_with = "serialize_organism")]
        organism: Organism,
        ontology_terms: Vec<String>,
        requested_outputs: Vec<OutputType>,
    },
}

fn serialize_organism<S: serde::Serializer>(
    organism: &Organism,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(organism.service_id())
}

impl PredictionRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionRequest::Sequence { .. } => "sequence",
            PredictionRequest::Variant { .. } => "variant",
            PredictionRequest::Interval { .. } => "interval",
        }
    }

    pub fn ontology_terms(&self) -> &[String] {
        match self {
            PredictionRequest::Sequence { ontology_terms, .. }
            | PredictionRequest::Variant { ontology_terms, .. }
            | PredictionRequest::Interval { ontology_terms, .. } => ontology_terms,
        }
    }

    pub fn requested_outputs(&self) -> &[OutputType] {
        match self {
            PredictionRequest::Sequence { requested_outputs, .. }
            | PredictionRequest::Variant { requested_outputs, .. }
            | PredictionRequest::Interval { requested_outputs, .. } => requested_outputs,
        }
    }
}

/// Builds service requests from queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBuilder {
    flank: u64,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_FLANK)
    }
}

impl RequestBuilder {
    /// Creates a builder using `flank` bases of context on each side of a variant.
    pub fn new(flank: u64) -> Self {
        Self { flank }
    }

    /// Context window around a variant, clamped at 0 on the lower bound.
    pub fn variant_context(&self, variant: &Variant) -> Interval {
        Interval::new(
            variant.chromosome,
            variant.position.saturating_sub(self.flank),
            variant.position.saturating_add(self.flank),
        )
    }

    pub fn build(&self, query: &Query) -> PredictionRequest {
        let target = query.target();
        let ontology_terms = vec![target.tissue.ontology_term().to_string()];
        let requested_outputs = vec![target.output];

        let request = match query {
            Query::Sequence(q) => PredictionRequest::Sequence {
                sequence: q.sequence.clone(),
                organism: target.organism,
                ontology_terms,
                requested_outputs,
            },
            Query::Variant(q) => PredictionRequest::Variant {
                interval: self.variant_context(&q.variant),
                variant: q.variant,
                organism: target.organism,
                ontology_terms,
                requested_outputs,
            },
            Query::Interval(q) => PredictionRequest::Interval {
                interval: q.interval,
                organism: target.organism,
                ontology_terms,
                requested_outputs,
            },
        };

        debug!(
            kind = request.kind(),
            terms = ?request.ontology_terms(),
            outputs = ?request.requested_outputs(),
            "built prediction request"
        );
        request
    }
}
