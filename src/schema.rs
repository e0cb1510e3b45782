//! Record schemas: which columns a table has and which of them are searchable.
//!
//! Schemas are plain values handed to the compiler; nothing here is global.
//! The two presets mirror the portal's `Study` and `Sample` tables. Custom
//! schemas can be loaded from JSON:
//!
//! ```
//! use riboquery::Schema;
//!
//! let schema = Schema::from_json(
//!     r#"{"name": "run", "fields": ["id", "Run", "Platform"], "excluded": ["id"]}"#,
//! ).unwrap();
//! assert_eq!(schema.searchable_fields().collect::<Vec<_>>(), ["Run", "Platform"]);
//! assert_eq!(schema.resolve("platform"), Some("Platform"));
//! ```

use serde::{Deserialize, Serialize};

/// Bookkeeping columns that are never searched.
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "id",
    "verified",
    "trips_id",
    "gwips_id",
    "ribocrypt_id",
    "FASTA_file",
];

const STUDY_FIELDS: &[&str] = &[
    "BioProject",
    "Name",
    "Title",
    "ScientificName",
    "Samples",
    "SRA",
    "Release_Date",
    "Description",
    "seq_types",
    "GSE",
    "PMID",
    "Authors",
    "Study_abstract",
    "Publication_title",
    "doi",
    "Date_published",
    "PMC",
    "Journal",
    "Paper_abstract",
    "Email",
    "sample",
];

const SAMPLE_FIELDS: &[&str] = &[
    "id",
    "verified",
    "trips_id",
    "gwips_id",
    "ribocrypt_id",
    "readfile",
    "process_status",
    "FASTA_file",
    "GEO",
    "Run",
    "spots",
    "bases",
    "avgLength",
    "size_MB",
    "Experiment",
    "LibraryName",
    "LibraryStrategy",
    "LibrarySelection",
    "LibrarySource",
    "LibraryLayout",
    "InsertSize",
    "InsertDev",
    "Platform",
    "Model",
    "SRAStudy",
    "BioProject",
    "Study_Pubmed_id",
    "Sample",
    "BioSample",
    "SampleType",
    "TaxID",
    "ScientificName",
    "SampleName",
    "CenterName",
    "Submission",
    "MONTH",
    "YEAR",
    "AUTHOR",
    "sample_source",
    "sample_title",
    "LIBRARYTYPE",
    "REPLICATE",
    "CONDITION",
    "INHIBITOR",
    "BATCH",
    "TIMEPOINT",
    "TISSUE",
    "CELL_LINE",
    "FRACTION",
    "ENA_first_public",
    "ENA_last_update",
    "INSDC_center_alias",
    "INSDC_center_name",
    "INSDC_first_public",
    "INSDC_last_update",
    "INSDC_status",
    "ENA_checklist",
    "GEO_Accession",
    "Experiment_Date",
    "date_sequenced",
    "submission_date",
    "date",
    "STAGE",
    "GENE",
    "Sex",
    "Strain",
    "Age",
    "Infected",
    "Disease",
    "Genotype",
    "Feeding",
    "Temperature",
    "SiRNA",
    "SgRNA",
    "ShRNA",
    "Plasmid",
    "Growth_Condition",
    "Stress",
    "Cancer",
    "microRNA",
    "Individual",
    "Antibody",
    "Ethnicity",
    "Dose",
    "Stimulation",
    "Host",
    "UMI",
    "Adapter",
    "Separation",
    "rRNA_depletion",
    "Barcode",
    "Monosome_purification",
    "Nuclease",
    "Kit",
    "Info",
];

/// Portal display names, column first. Facet forms submit these labels.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("Run", "Run Accession"),
    ("spots", "Total Number of Spots (Original file))"),
    ("bases", "Total Number of Bases (Original file)"),
    ("avgLength", "Average Read Length"),
    ("size_MB", "Original File Size (MB)"),
    ("LibraryName", "Library Name"),
    ("LibraryStrategy", "Library Strategy"),
    ("LibrarySelection", "Library Selection"),
    ("LibrarySource", "Library Source"),
    ("LibraryLayout", "Library Layout"),
    ("InsertSize", "Insert Size"),
    ("InsertDev", "Insert Deviation"),
    ("Platform", "Platform"),
    ("Model", "Model"),
    ("SRAStudy", "SRA Project Accession (SRP)"),
    ("BioProject", "BioProject"),
    ("Study_Pubmed_id", "PubMed ID"),
    ("Sample", "Sample"),
    ("BioSample", "BioSample"),
    ("SampleType", "Sample Type"),
    ("TaxID", "Organism TaxID"),
    ("ScientificName", "Organism"),
    ("SampleName", "Sample Name"),
    ("CenterName", "Center Name"),
    ("Submission", "Submission"),
    ("MONTH", "Month"),
    ("YEAR", "Year"),
    ("AUTHOR", "Author"),
    ("sample_source", "Sample Source"),
    ("sample_title", "Sample Title"),
    ("ENA_first_public", "ENA First Public"),
    ("ENA_last_update", "ENA Last Update"),
    ("INSDC_center_alias", "INSDC Center Alias"),
    ("INSDC_center_name", "INSDC Center Name"),
    ("INSDC_first_public", "INSDC First Public"),
    ("INSDC_last_update", "INSDC Last Update"),
    ("GEO_Accession", "GEO Accession"),
    ("Experiment_Date", "Date of Experiment"),
    ("date_sequenced", "Date of Sequencing"),
    ("submission_date", "Submission Date"),
    ("date", "Date"),
    ("Experiment", "Experiment ID"),
    ("CELL_LINE", "Cell-Line"),
    ("TISSUE", "Tissue"),
    ("INHIBITOR", "Inhibitor"),
    ("TIMEPOINT", "Timepoint"),
    ("FRACTION", "Cellular-Compartment"),
    ("REPLICATE", "Replicate-Number"),
    ("CONDITION", "Condition"),
    ("LIBRARYTYPE", "Library-Type"),
    ("STAGE", "Stage"),
    ("GENE", "Gene"),
    ("Sex", "Sex"),
    ("Strain", "Strain"),
    ("Age", "Age"),
    ("Infected", "Infected"),
    ("Disease", "Disease"),
    ("Genotype", "Genotype"),
    ("Feeding", "Feeding"),
    ("Temperature", "Temperature"),
    ("SiRNA", "SiRNA"),
    ("SgRNA", "SgRNA"),
    ("ShRNA", "ShRNA"),
    ("Plasmid", "Plasmid"),
    ("Growth_Condition", "Growth-Condition"),
    ("Stress", "Stress"),
    ("Cancer", "Cancer"),
    ("microRNA", "MicroRNA"),
    ("Individual", "Individual"),
    ("Antibody", "Antibody Used"),
    ("Ethnicity", "Ethnicity"),
    ("Dose", "Dose"),
    ("Stimulation", "Stimulation"),
    ("Host", "Host Organism"),
    ("UMI", "Unique Molecular Identifier (UMI)"),
    ("Adapter", "Adapter Sequence"),
    ("Separation", "Mode of Separation"),
    ("rRNA_depletion", "Mode of rRNA depletion"),
    ("Barcode", "Barcode Information"),
    ("Monosome_purification", "Mode of Purification"),
    ("Nuclease", "Nucelase Used"),
    ("Kit", "Kit Used"),
    ("Organism", "Organism"),
    ("PMID", "PubMed"),
    ("count", "count"),
    ("verified", "verified"),
    ("trips_id", "trips_id"),
    ("gwips_id", "gwips_id"),
    ("ribocrypt_id", "ribocrypt_id"),
    ("readfile", "readfile"),
];

/// Checkbox columns; a ticked box submits `on`.
pub const FLAG_FIELDS: &[&str] = &["trips_id", "gwips_id", "ribocrypt_id", "readfile", "verified"];

/// Column layout of one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Table name, used in logs and reports
    pub name: String,

    /// Every column, in declaration order
    pub fields: Vec<String>,

    /// Columns left out of every search
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,

    /// `(column, display name)` pairs used by facet forms
    #[serde(default)]
    pub display_names: Vec<(String, String)>,

    /// Columns whose facet value is a checkbox
    #[serde(default = "default_flags")]
    pub flag_fields: Vec<String>,
}

fn default_excluded() -> Vec<String> {
    DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect()
}

fn default_flags() -> Vec<String> {
    owned(FLAG_FIELDS)
}

fn portal_display_names() -> Vec<(String, String)> {
    DISPLAY_NAMES
        .iter()
        .map(|(column, label)| (column.to_string(), label.to_string()))
        .collect()
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Schema {
    /// Schema with the default exclusion list.
    pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
        Schema {
            name: name.into(),
            fields,
            excluded: default_excluded(),
            display_names: Vec::new(),
            flag_fields: default_flags(),
        }
    }

    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn with_display_names(mut self, display_names: Vec<(String, String)>) -> Self {
        self.display_names = display_names;
        self
    }

    /// The portal's Study table.
    pub fn study() -> Self {
        let mut excluded = default_excluded();
        excluded.push("sample".to_string());
        Schema::new("study", owned(STUDY_FIELDS))
            .with_excluded(excluded)
            .with_display_names(portal_display_names())
    }

    /// The portal's Sample table.
    pub fn sample() -> Self {
        let mut excluded = default_excluded();
        excluded.extend(owned(&["readfile", "BioProject"]));
        Schema::new("sample", owned(SAMPLE_FIELDS))
            .with_excluded(excluded)
            .with_display_names(portal_display_names())
    }

    /// Preset by name: `study` or `sample`, any case.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "study" | "studies" => Some(Self::study()),
            "sample" | "samples" => Some(Self::sample()),
            _ => None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_excluded(&self, field: &str) -> bool {
        self.excluded.iter().any(|e| e == field)
    }

    /// Columns that take part in searches, in declaration order.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(String::as_str)
            .filter(|f| !self.is_excluded(f))
    }

    /// Display name of `column`, or the column itself when it has none.
    pub fn display_name<'s>(&'s self, column: &'s str) -> &'s str {
        self.display_names
            .iter()
            .find(|(c, _)| c == column)
            .map_or(column, |(_, label)| label.as_str())
    }

    /// Column behind a display name. The first column carrying the label
    /// wins; names that are not labels are returned unchanged.
    pub fn column_for<'s>(&'s self, name: &'s str) -> &'s str {
        self.display_names
            .iter()
            .find(|(_, label)| label == name)
            .map_or(name, |(column, _)| column.as_str())
    }

    pub fn is_flag(&self, column: &str) -> bool {
        self.flag_fields.iter().any(|f| f == column)
    }

    /// Map a user-typed field name onto a searchable column.
    ///
    /// An exact match wins; otherwise the first case-insensitive match is
    /// used. Excluded and unknown names resolve to `None`.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.searchable_fields()
            .find(|f| *f == name)
            .or_else(|| self.searchable_fields().find(|f| f.eq_ignore_ascii_case(name)))
    }
}

#[test]
fn test_presets_hide_bookkeeping_columns() {
    let sample = Schema::sample();
    assert!(sample.resolve("verified").is_none());
    assert!(sample.resolve("BioProject").is_none());
    assert_eq!(sample.resolve("disease"), Some("Disease"));

    let study = Schema::study();
    assert_eq!(study.resolve("BioProject"), Some("BioProject"));
    assert!(study.resolve("sample").is_none());
}

#[test]
fn test_display_names_map_back_to_columns() {
    let sample = Schema::sample();
    assert_eq!(sample.column_for("Run Accession"), "Run");
    assert_eq!(sample.column_for("Library-Type"), "LIBRARYTYPE");
    // Two columns share "Organism"; the first listed wins.
    assert_eq!(sample.column_for("Organism"), "ScientificName");
    assert_eq!(sample.column_for("Disease"), "Disease");
    assert_eq!(sample.column_for("not a label"), "not a label");
    assert_eq!(sample.display_name("CELL_LINE"), "Cell-Line");
    assert!(sample.is_flag("verified"));
    assert!(!sample.is_flag("Run"));
}
