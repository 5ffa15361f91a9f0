use serde::{Deserialize, Serialize};

/// Sequence type requested from the alignment service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    Genomic,
    #[serde(rename = "CDS")]
    Cds,
}

impl SequenceType {
    /// Value sent in the `Type` form field
    #[must_use]
    pub fn as_form_value(self) -> &'static str {
        match self {
            Self::Genomic => "Genomic",
            Self::Cds => "CDS",
        }
    }
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_form_value())
    }
}

/// A gene locus whose allele alignment is downloaded and converted.
///
/// Identity is the locus name; two loci with the same name are the same locus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locus {
    /// Gene name as understood by the service (e.g. "A", "DRB1")
    pub name: String,

    /// Reference allele the alignment is computed against
    pub reference: String,

    pub sequence_type: SequenceType,
}

impl Locus {
    pub fn new(
        name: impl Into<String>,
        reference: impl Into<String>,
        sequence_type: SequenceType,
    ) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            sequence_type,
        }
    }

    /// File name of the cached raw document
    #[must_use]
    pub fn cache_file_name(&self) -> String {
        format!("{}.html", self.name)
    }

    /// File name of the combined (concatenated sequence) CSV
    #[must_use]
    pub fn combined_file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    /// File name of the split (one field per column) CSV
    #[must_use]
    pub fn split_file_name(&self) -> String {
        format!("{}_split.csv", self.name)
    }
}

impl PartialEq for Locus {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Locus {}

impl std::fmt::Display for Locus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HLA-{}", self.name)
    }
}

/// (name, reference allele, sequence type) for every locus that is processed
const HLA_LOCUS_TABLE: [(&str, &str, SequenceType); 11] = [
    ("A", "01:01:01:01", SequenceType::Genomic),
    ("B", "07:02:01", SequenceType::Genomic),
    ("C", "01:02:01", SequenceType::Genomic),
    ("DPA1", "01:03:01:01", SequenceType::Genomic),
    ("DPB1", "01:01:01", SequenceType::Genomic),
    ("DQA1", "01:01:01", SequenceType::Genomic),
    ("DQB1", "05:01:01:01", SequenceType::Genomic),
    ("DRB1", "01:01:01", SequenceType::Genomic),
    ("DRB3", "01:01:01", SequenceType::Genomic),
    ("DRB4", "01:01:01", SequenceType::Genomic),
    ("DRB5", "01:01:01", SequenceType::Cds),
];

/// The fixed set of HLA loci, in name order
#[must_use]
pub fn hla_loci() -> Vec<Locus> {
    HLA_LOCUS_TABLE
        .iter()
        .map(|&(name, reference, sequence_type)| Locus::new(name, reference, sequence_type))
        .collect()
}
