//! Genomic vocabulary shared by every layer.
//!
//! This module contains the closed sets the user picks from and the
//! coordinates a query is made of:
//! - Organisms, tissues (ontology terms), output types
//! - Chromosomes and bases
//! - Intervals, variants and the `Query` sum type
//!
//! Only identifiers live here. Localized labels are in `i18n`.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Organism a prediction is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Organism {
    #[default]
    Human,
    Mouse,
}

impl Organism {
    pub const ALL: [Organism; 2] = [Organism::Human, Organism::Mouse];

    /// Short name used in the JSON artifact.
    pub fn name(self) -> &'static str {
        match self {
            Organism::Human => "human",
            Organism::Mouse => "mouse",
        }
    }

    /// Identifier expected by the prediction service.
    pub fn service_id(self) -> &'static str {
        match self {
            Organism::Human => "HOMO_SAPIENS",
            Organism::Mouse => "MUS_MUSCULUS",
        }
    }
}

/// Tissue or cell type, identified by its UBERON ontology term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tissue {
    #[default]
    Lung,
    Brain,
    Liver,
    Spleen,
    Kidney,
    Heart,
    Colon,
}

impl Tissue {
    pub const ALL: [Tissue; 7] = [
        Tissue::Lung,
        Tissue::Brain,
        Tissue::Liver,
        Tissue::Spleen,
        Tissue::Kidney,
        Tissue::Heart,
        Tissue::Colon,
    ];

    pub fn ontology_term(self) -> &'static str {
        match self {
            Tissue::Lung => "UBERON:0002048",
            Tissue::Brain => "UBERON:0000955",
            Tissue::Liver => "UBERON:0002107",
            Tissue::Spleen => "UBERON:0002106",
            Tissue::Kidney => "UBERON:0002113",
            Tissue::Heart => "UBERON:0000948",
            Tissue::Colon => "UBERON:0001157",
        }
    }
}

/// Category of genomic signal requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputType {
    #[default]
    RnaSeq,
    Dnase,
    Atac,
    Cage,
    ChipHistone,
}

impl OutputType {
    pub const ALL: [OutputType; 5] = [
        OutputType::RnaSeq,
        OutputType::Dnase,
        OutputType::Atac,
        OutputType::Cage,
        OutputType::ChipHistone,
    ];

    /// Identifier expected by the service and echoed in the artifact.
    pub fn id(self) -> &'static str {
        match self {
            OutputType::RnaSeq => "RNA_SEQ",
            OutputType::Dnase => "DNASE",
            OutputType::Atac => "ATAC",
            OutputType::Cage => "CAGE",
            OutputType::ChipHistone => "CHIP_HISTONE",
        }
    }

    /// Name of the track carrying this output in a prediction response.
    pub fn track(self) -> &'static str {
        match self {
            OutputType::RnaSeq => "rna_seq",
            OutputType::Dnase => "dnase",
            OutputType::Atac => "atac",
            OutputType::Cage => "cage",
            OutputType::ChipHistone => "chip_histone",
        }
    }
}

/// A chromosome of the reference assembly: chr1..chr22, chrX, chrY.
///
/// Stored as its index in [`Chromosome::all`] (0 = chr1, 22 = chrX, 23 = chrY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Chromosome(u8);

impl Chromosome {
    pub const COUNT: usize = 24;

    /// Returns all chromosomes in display order.
    pub fn all() -> impl Iterator<Item = Chromosome> {
        (0..Self::COUNT as u8).map(Chromosome)
    }

    /// Creates a chromosome from its index in display order.
    pub fn from_index(index: usize) -> Option<Chromosome> {
        (index < Self::COUNT).then_some(Chromosome(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Autosome by number (1-22).
    pub fn autosome(number: u8) -> Option<Chromosome> {
        (1..=22).contains(&number).then(|| Chromosome(number - 1))
    }

    pub const X: Chromosome = Chromosome(22);
    pub const Y: Chromosome = Chromosome(23);
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            22 => write!(f, "chrX"),
            23 => write!(f, "chrY"),
            n => write!(f, "chr{}", n + 1),
        }
    }
}

/// Errors raised when parsing coordinates typed by the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Unknown base: {0}")]
    UnknownBase(String),

    #[error("Invalid coordinate: {0}")]
    InvalidNumber(String),

    #[error("Expected {expected}, got '{input}'")]
    Malformed { expected: &'static str, input: String },
}

impl FromStr for Chromosome {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("chr")
            .or_else(|| trimmed.strip_prefix("CHR"))
            .unwrap_or(trimmed);
        match name {
            "X" | "x" => Ok(Chromosome::X),
            "Y" | "y" => Ok(Chromosome::Y),
            _ => name
                .parse::<u8>()
                .ok()
                .and_then(Chromosome::autosome)
                .ok_or_else(|| CoordinateError::UnknownChromosome(s.to_string())),
        }
    }
}

impl Serialize for Chromosome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Chromosome {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A nucleotide selectable as reference or alternate base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Base {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Base::A),
            "T" => Ok(Base::T),
            "G" => Ok(Base::G),
            "C" => Ok(Base::C),
            _ => Err(CoordinateError::UnknownBase(s.to_string())),
        }
    }
}

/// A half-open genomic range on a chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub chromosome: Chromosome,
    pub start: u64,
    pub end: u64,
}

impl Interval {
    pub fn new(chromosome: Chromosome, start: u64, end: u64) -> Self {
        Self { chromosome, start, end }
    }

    /// Number of bases covered (0 for an empty or inverted interval).
    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// Parses `chr22:35677410-36725986`.
impl FromStr for Interval {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            expected: "chrN:START-END",
            input: s.to_string(),
        };
        let (chrom, range) = s.trim().split_once(':').ok_or_else(malformed)?;
        let (start, end) = range.split_once('-').ok_or_else(malformed)?;
        Ok(Interval::new(
            chrom.parse()?,
            parse_coordinate(start)?,
            parse_coordinate(end)?,
        ))
    }
}

/// A single-base substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub chromosome: Chromosome,
    pub position: u64,
    #[serde(rename = "reference_bases")]
    pub reference: Base,
    #[serde(rename = "alternate_bases")]
    pub alternate: Base,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {}>{}",
            self.chromosome, self.position, self.reference, self.alternate
        )
    }
}

/// Parses `chr22:36201698:A>C`.
impl FromStr for Variant {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            expected: "chrN:POS:REF>ALT",
            input: s.to_string(),
        };
        let mut parts = s.trim().splitn(3, ':');
        let chrom = parts.next().ok_or_else(malformed)?;
        let position = parts.next().ok_or_else(malformed)?;
        let change = parts.next().ok_or_else(malformed)?;
        let (reference, alternate) = change.split_once('>').ok_or_else(malformed)?;
        Ok(Variant {
            chromosome: chrom.parse()?,
            position: parse_coordinate(position)?,
            reference: reference.parse()?,
            alternate: alternate.parse()?,
        })
    }
}

/// Parses a coordinate, accepting `_` and `,` as digit separators.
pub fn parse_coordinate(s: &str) -> Result<u64, CoordinateError> {
    let digits: String = s.trim().chars().filter(|c| *c != '_' && *c != ',').collect();
    digits
        .parse()
        .map_err(|_| CoordinateError::InvalidNumber(s.trim().to_string()))
}

/// What every query asks the service for, independent of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Target {
    pub organism: Organism,
    pub tissue: Tissue,
    pub output: OutputType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceQuery {
    pub target: Target,
    /// Whitespace-free sequence text
    pub sequence: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantQuery {
    pub target: Target,
    pub variant: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalQuery {
    pub target: Target,
    pub interval: Interval,
}

/// A user query, one of the three analysis kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Sequence(SequenceQuery),
    Variant(VariantQuery),
    Interval(IntervalQuery),
}

impl Query {
    pub fn target(&self) -> &Target {
        match self {
            Query::Sequence(q) => &q.target,
            Query::Variant(q) => &q.target,
            Query::Interval(q) => &q.target,
        }
    }

    /// Kind tag used in logs and the JSON artifact.
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Sequence(_) => "sequence",
            Query::Variant(_) => "variant",
            Query::Interval(_) => "interval",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chromosome_names() {
        let names: Vec<String> = Chromosome::all().map(|c| c.to_string()).collect();
        assert_eq!(names.len(), 24);
        assert_eq!(names[0], "chr1");
        assert_eq!(names[21], "chr22");
        assert_eq!(names[22], "chrX");
        assert_eq!(names[23], "chrY");
    }

    #[test]
    fn test_chromosome_parse() {
        assert_eq!("chr22".parse::<Chromosome>().unwrap(), Chromosome::autosome(22).unwrap());
        assert_eq!("X".parse::<Chromosome>().unwrap(), Chromosome::X);
        assert_eq!("chrY".parse::<Chromosome>().unwrap(), Chromosome::Y);
        assert!("chr23".parse::<Chromosome>().is_err());
        assert!("chr0".parse::<Chromosome>().is_err());
        assert!("chrM".parse::<Chromosome>().is_err());
        assert_eq!(Chromosome::autosome(0), None);
        assert!("chr0:100:A>C".parse::<Variant>().is_err());
        assert!("chr0:100-200".parse::<Interval>().is_err());
    }

    #[test]
    fn test_tissue_terms() {
        assert_eq!(Tissue::Colon.ontology_term(), "UBERON:0001157");
        assert_eq!(Tissue::Brain.ontology_term(), "UBERON:0000955");
    }

    #[test]
    fn test_output_type_ids() {
        assert_eq!(OutputType::ChipHistone.id(), "CHIP_HISTONE");
        assert_eq!(OutputType::ChipHistone.track(), "chip_histone");
        assert_eq!(
            serde_json::to_string(&OutputType::RnaSeq).unwrap(),
            "\"RNA_SEQ\""
        );
    }

    #[test]
    fn test_parse_interval() {
        let interval: Interval = "chr22:35677410-36725986".parse().unwrap();
        assert_eq!(interval.chromosome.to_string(), "chr22");
        assert_eq!(interval.start, 35_677_410);
        assert_eq!(interval.end, 36_725_986);
        assert_eq!(interval.width(), 1_048_576);
        assert_eq!(interval.to_string(), "chr22:35677410-36725986");

        assert!("chr22:100".parse::<Interval>().is_err());
        assert!("chr22-100-200".parse::<Interval>().is_err());
    }

    #[test]
    fn test_parse_variant() {
        let variant: Variant = "chr22:36,201,698:a>C".parse().unwrap();
        assert_eq!(variant.position, 36_201_698);
        assert_eq!(variant.reference, Base::A);
        assert_eq!(variant.alternate, Base::C);

        assert!(matches!(
            "chr22:1:A>N".parse::<Variant>(),
            Err(CoordinateError::UnknownBase(_))
        ));
        assert!(matches!(
            "chr22:1:AC".parse::<Variant>(),
            Err(CoordinateError::Malformed { .. })
        ));
    }

    #[test]
    fn test_variant_serializes_service_field_names() {
        let variant: Variant = "chr1:10:G>T".parse().unwrap();
        let json = serde_json::to_value(variant).unwrap();
        assert_eq!(json["chromosome"], "chr1");
        assert_eq!(json["reference_bases"], "G");
        assert_eq!(json["alternate_bases"], "T");
    }
}
