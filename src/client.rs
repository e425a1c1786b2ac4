//! Prediction service client adapter.
//!
//! The service is reached through two seams:
//! - [`ClientFactory`] creates a client from an API key
//! - [`PredictionClient`] exposes the three prediction calls
//!
//! [`submit`] drives one request through a freshly created client and folds
//! the response into an [`AnalysisRecord`]. Only tensor shapes are kept.
//! Every client error becomes [`AnalysisError::RemoteCall`] carrying its
//! message, with no retry.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::genome::{Interval, Organism, OutputType, Variant};
use crate::outcome::{AnalysisError, AnalysisRecord, SHAPE_UNAVAILABLE};
use crate::request::PredictionRequest;

/// Errors raised by a prediction client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// Metadata of one output tensor. The numeric payload is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackData {
    pub shape: Vec<usize>,
}

/// Response for one sequence or interval, keyed by track name.
///
/// Entries are kept as raw JSON so unrelated keys (metadata, versions)
/// never break parsing. Only the requested track is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction {
    pub tracks: BTreeMap<String, Value>,
}

impl Prediction {
    /// The requested track, if present and carrying a usable shape.
    pub fn track(&self, output: OutputType) -> Option<TrackData> {
        let value = self.tracks.get(output.track())?;
        TrackData::deserialize(value).ok()
    }

    /// Shape of the requested output, formatted like `(16384, 667)`.
    pub fn shape_of(&self, output: OutputType) -> String {
        self.track(output)
            .map(|track| format_shape(&track.shape))
            .unwrap_or_else(|| SHAPE_UNAVAILABLE.to_string())
    }
}

/// Predictions for the reference and alternate alleles of a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPrediction {
    pub reference: Prediction,
    pub alternate: Prediction,
}

/// Formats a tensor shape as a tuple: `(3,)`, `(2, 5)`, `()`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// The three calls offered by the prediction service.
pub trait PredictionClient {
    fn predict_sequence(
        &self,
        sequence: &str,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<Prediction, ClientError>;

    fn predict_variant(
        &self,
        interval: &Interval,
        variant: &Variant,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<VariantPrediction, ClientError>;

    fn predict_interval(
        &self,
        interval: &Interval,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<Prediction, ClientError>;
}

/// Creates clients bound to an API key.
pub trait ClientFactory {
    fn create(&self, api_key: &str) -> Result<Box<dyn PredictionClient>, ClientError>;
}

/// Sends `request` to the service and summarizes the response.
///
/// Any client error becomes [`AnalysisError::RemoteCall`] with its message.
pub fn submit(
    factory: &dyn ClientFactory,
    api_key: &str,
    request: &PredictionRequest,
) -> Result<AnalysisRecord, AnalysisError> {
    info!(kind = request.kind(), "submitting prediction request");
    call(factory, api_key, request).map_err(|err| {
        warn!(kind = request.kind(), error = %err, "prediction request failed");
        AnalysisError::RemoteCall(err.to_string())
    })
}

fn call(
    factory: &dyn ClientFactory,
    api_key: &str,
    request: &PredictionRequest,
) -> Result<AnalysisRecord, ClientError> {
    let client = factory.create(api_key)?;

    let record = match request {
        PredictionRequest::Sequence {
            sequence,
            organism,
            ontology_terms,
            requested_outputs,
        } => {
            let prediction =
                client.predict_sequence(sequence, *organism, ontology_terms, requested_outputs)?;
            let output = first_output(requested_outputs);
            AnalysisRecord::Sequence {
                sequence_length: sequence.chars().count(),
                organism: organism.name().to_string(),
                tissue: first_term(ontology_terms),
                output_type: output.id().to_string(),
                data_shape: prediction.shape_of(output),
                timestamp: Local::now(),
            }
        }
        PredictionRequest::Variant {
            interval,
            variant,
            organism,
            ontology_terms,
            requested_outputs,
        } => {
            let prediction = client.predict_variant(
                interval,
                variant,
                *organism,
                ontology_terms,
                requested_outputs,
            )?;
            let output = first_output(requested_outputs);
            AnalysisRecord::Variant {
                chromosome: variant.chromosome.to_string(),
                position: variant.position,
                reference: variant.reference.to_string(),
                alternate: variant.alternate.to_string(),
                organism: organism.name().to_string(),
                tissue: first_term(ontology_terms),
                output_type: output.id().to_string(),
                ref_shape: prediction.reference.shape_of(output),
                alt_shape: prediction.alternate.shape_of(output),
                timestamp: Local::now(),
            }
        }
        PredictionRequest::Interval {
            interval,
            organism,
            ontology_terms,
            requested_outputs,
        } => {
            let prediction =
                client.predict_interval(interval, *organism, ontology_terms, requested_outputs)?;
            let output = first_output(requested_outputs);
            AnalysisRecord::Interval {
                chromosome: interval.chromosome.to_string(),
                start: interval.start,
                end: interval.end,
                organism: organism.name().to_string(),
                tissue: first_term(ontology_terms),
                output_type: output.id().to_string(),
                data_shape: prediction.shape_of(output),
                timestamp: Local::now(),
            }
        }
    };

    Ok(record)
}

fn first_output(outputs: &[OutputType]) -> OutputType {
    outputs.first().copied().unwrap_or_default()
}

fn first_term(terms: &[String]) -> String {
    terms.first().cloned().unwrap_or_default()
}

/// Creates [`HttpClient`]s talking JSON to a prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpClientFactory {
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpClientFactory {
    /// `timeout` of `None` leaves slow responses to the network stack.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, api_key: &str) -> Result<Box<dyn PredictionClient>, ClientError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "endpoint must start with http:// or https:// (got '{}')",
                self.endpoint
            )));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        Ok(Box::new(HttpClient {
            http,
            endpoint: self.endpoint.clone(),
            api_key: api_key.trim().to_string(),
        }))
    }
}

/// Blocking JSON client for the prediction service.
pub struct HttpClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct SequenceBody<'a> {
    sequence: &'a str,
    organism: &'static str,
    ontology_terms: &'a [String],
    requested_outputs: &'a [OutputType],
}

#[derive(Serialize)]
struct VariantBody<'a> {
    interval: &'a Interval,
    variant: &'a Variant,
    organism: &'static str,
    ontology_terms: &'a [String],
    requested_outputs: &'a [OutputType],
}

#[derive(Serialize)]
struct IntervalBody<'a> {
    interval: &'a Interval,
    organism: &'static str,
    ontology_terms: &'a [String],
    requested_outputs: &'a [OutputType],
}

impl HttpClient {
    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}/v1/{}", self.endpoint, method);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: text.trim().to_string(),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl PredictionClient for HttpClient {
    fn predict_sequence(
        &self,
        sequence: &str,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<Prediction, ClientError> {
        self.post(
            "predict_sequence",
            &SequenceBody {
                sequence,
                organism: organism.service_id(),
                ontology_terms,
                requested_outputs,
            },
        )
    }

    fn predict_variant(
        &self,
        interval: &Interval,
        variant: &Variant,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<VariantPrediction, ClientError> {
        self.post(
            "predict_variant",
            &VariantBody {
                interval,
                variant,
                organism: organism.service_id(),
                ontology_terms,
                requested_outputs,
            },
        )
    }

    fn predict_interval(
        &self,
        interval: &Interval,
        organism: Organism,
        ontology_terms: &[String],
        requested_outputs: &[OutputType],
    ) -> Result<Prediction, ClientError> {
        self.post(
            "predict_interval",
            &IntervalBody {
                interval,
                organism: organism.service_id(),
                ontology_terms,
                requested_outputs,
            },
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::genome::{
        Base, Chromosome, IntervalQuery, Query, SequenceQuery, Target, VariantQuery,
    };
    use crate::request::RequestBuilder;

    /// Canned client answering every call with the same tracks.
    pub(crate) struct FakeClient {
        pub tracks: Prediction,
        pub fail_with: Option<String>,
    }

    impl FakeClient {
        fn answer(&self) -> Result<Prediction, ClientError> {
            match &self.fail_with {
                Some(message) => Err(ClientError::Rejected {
                    status: 503,
                    message: message.clone(),
                }),
                None => Ok(self.tracks.clone()),
            }
        }
    }

    impl PredictionClient for FakeClient {
        fn predict_sequence(
            &self,
            _: &str,
            _: Organism,
            _: &[String],
            _: &[OutputType],
        ) -> Result<Prediction, ClientError> {
            self.answer()
        }

        fn predict_variant(
            &self,
            _: &Interval,
            _: &Variant,
            _: Organism,
            _: &[String],
            _: &[OutputType],
        ) -> Result<VariantPrediction, ClientError> {
            let prediction = self.answer()?;
            Ok(VariantPrediction {
                reference: prediction.clone(),
                alternate: prediction,
            })
        }

        fn predict_interval(
            &self,
            _: &Interval,
            _: Organism,
            _: &[String],
            _: &[OutputType],
        ) -> Result<Prediction, ClientError> {
            self.answer()
        }
    }

    /// Factory counting how many clients were created.
    #[derive(Clone, Default)]
    pub(crate) struct FakeFactory {
        pub created: Rc<Cell<usize>>,
        pub fail_with: Option<String>,
    }

    impl ClientFactory for FakeFactory {
        fn create(&self, _api_key: &str) -> Result<Box<dyn PredictionClient>, ClientError> {
            self.created.set(self.created.get() + 1);
            let mut tracks = Prediction::default();
            tracks
                .tracks
                .insert("rna_seq".to_string(), json!({ "shape": [16_384, 667] }));
            Ok(Box::new(FakeClient {
                tracks,
                fail_with: self.fail_with.clone(),
            }))
        }
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[3]), "(3,)");
        assert_eq!(format_shape(&[1_048_576, 667]), "(1048576, 667)");
    }

    #[test]
    fn test_prediction_ignores_values() {
        let body = r#"{"rna_seq": {"shape": [2, 3], "values": [[1,2,3],[4,5,6]]}}"#;
        let prediction: Prediction = serde_json::from_str(body).unwrap();
        assert_eq!(prediction.shape_of(OutputType::RnaSeq), "(2, 3)");
        assert_eq!(prediction.shape_of(OutputType::Dnase), "N/A");
    }

    #[test]
    fn test_prediction_tolerates_extra_keys() {
        let body = r#"{"rna_seq": {"shape": [2, 3]}, "metadata": {"ontology": "UBERON"}}"#;
        let prediction: Prediction = serde_json::from_str(body).unwrap();
        assert_eq!(prediction.shape_of(OutputType::RnaSeq), "(2, 3)");

        let body = r#"{"rna_seq": {"shape": [2, 3]}, "model_version": "v1"}"#;
        let prediction: Prediction = serde_json::from_str(body).unwrap();
        assert_eq!(prediction.shape_of(OutputType::RnaSeq), "(2, 3)");
    }

    #[test]
    fn test_track_without_shape_is_unavailable() {
        let body = r#"{"rna_seq": {"values": []}, "dnase": {"shape": "unknown"}}"#;
        let prediction: Prediction = serde_json::from_str(body).unwrap();
        assert_eq!(prediction.shape_of(OutputType::RnaSeq), "N/A");
        assert_eq!(prediction.shape_of(OutputType::Dnase), "N/A");
    }

    #[test]
    fn test_submit_sequence() {
        let factory = FakeFactory::default();
        let query = Query::Sequence(SequenceQuery {
            target: Target::default(),
            sequence: "ACGTN".repeat(10),
        });
        let request = RequestBuilder::default().build(&query);

        match submit(&factory, "key", &request) {
            Ok(AnalysisRecord::Sequence {
                sequence_length,
                organism,
                tissue,
                output_type,
                data_shape,
                ..
            }) => {
                assert_eq!(sequence_length, 50);
                assert_eq!(organism, "human");
                assert_eq!(tissue, "UBERON:0002048");
                assert_eq!(output_type, "RNA_SEQ");
                assert_eq!(data_shape, "(16384, 667)");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(factory.created.get(), 1);
    }

    #[test]
    fn test_submit_variant_missing_track() {
        let factory = FakeFactory::default();
        let query = Query::Variant(VariantQuery {
            target: Target {
                output: OutputType::Cage,
                ..Target::default()
            },
            variant: Variant {
                chromosome: Chromosome::autosome(22).unwrap(),
                position: 36_201_698,
                reference: Base::A,
                alternate: Base::C,
            },
        });
        let request = RequestBuilder::default().build(&query);

        match submit(&factory, "key", &request) {
            Ok(AnalysisRecord::Variant {
                ref_shape,
                alt_shape,
                reference,
                alternate,
                ..
            }) => {
                assert_eq!(ref_shape, "N/A");
                assert_eq!(alt_shape, "N/A");
                assert_eq!(reference, "A");
                assert_eq!(alternate, "C");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_submit_failure_is_captured() {
        let factory = FakeFactory {
            fail_with: Some("quota exhausted".to_string()),
            ..FakeFactory::default()
        };
        let query = Query::Interval(IntervalQuery {
            target: Target::default(),
            interval: "chr1:0-100".parse().unwrap(),
        });
        let request = RequestBuilder::default().build(&query);

        match submit(&factory, "key", &request) {
            Err(AnalysisError::RemoteCall(message)) => {
                assert!(message.contains("HTTP 503"));
                assert!(message.contains("quota exhausted"));
            }
            other => panic!("expected a failure, got {:?}", other),
        }
        assert_eq!(factory.created.get(), 1);
    }

    #[test]
    fn test_http_factory_rejects_bad_endpoint() {
        let factory = HttpClientFactory::new("localhost:8080", None);
        let err = factory.create("key").err().unwrap();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_http_factory_trims_trailing_slash() {
        let factory = HttpClientFactory::new("https://predict.example.org/", None);
        assert_eq!(factory.endpoint(), "https://predict.example.org");
    }
}
