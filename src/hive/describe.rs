//! Row classifier for `DESCRIBE EXTENDED` results
//!
//! Hive answers `DESCRIBE EXTENDED db.table` with one row per column, then a row with an
//! empty `col_name`, then a detail section. Depending on the engine version the detail
//! section is a single `Detailed Table Information` row whose `data_type` holds the whole
//! metastore object, or a list of `# Partition Information`-style rows; only the former is
//! captured.
//!
//! The classifier is a two-state machine:
//!
//! - `InColumns`: a row with a blank label moves to `InDetail`; any other row is a column
//! - `InDetail`: a row labelled [`DETAIL_SECTION_LABEL`] is captured and decoded right away,
//!   every other row is skipped. There is no way back to `InColumns`.

use crate::hive::notation::{decode, DecodeOutcome, DetailedTableInfoMode};
use serde::{Deserialize, Serialize};

/// Row label marking the decodable blob inside the detail section (exact match).
pub const DETAIL_SECTION_LABEL: &str = "Detailed Table Information";

/// One row of a describe-style result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRow {
    #[serde(rename = "col_name", default)]
    pub label: Option<String>,
    #[serde(rename = "data_type", default)]
    pub type_text: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl MetadataRow {
    pub fn new(
        label: Option<impl Into<String>>,
        type_text: Option<impl Into<String>>,
        comment: Option<impl Into<String>>,
    ) -> Self {
        Self {
            label: label.map(Into::into),
            type_text: type_text.map(Into::into),
            comment: comment.map(Into::into),
        }
    }

    /// An ordinary column row
    pub fn column(name: &str, data_type: &str, comment: Option<&str>) -> Self {
        Self::new(Some(name), Some(data_type), comment)
    }

    /// The blank row separating columns from the detail section
    pub fn separator() -> Self {
        Self::default()
    }

    fn has_blank_label(&self) -> bool {
        self.label.as_deref().map_or(true, |label| label.trim().is_empty())
    }
}

/// A table column as published on the asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub description: String,
}

/// Column shape reported by a zero-row `SELECT`, used when `DESCRIBE` fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// The raw text captured from the `Detailed Table Information` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailBlob(pub String);

impl DetailBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Output of classifying one describe result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub columns: Vec<ColumnDescriptor>,
    pub detail: Option<DetailBlob>,
    pub decoded: Option<DecodeOutcome>,
}

impl Classification {
    /// Columns derived from a result-shape probe: empty descriptions, no detail section
    pub fn from_probe(probe: Vec<ProbeColumn>) -> Self {
        let columns = probe
            .into_iter()
            .map(|column| ColumnDescriptor {
                name: column.name,
                data_type: column.type_name,
                description: String::new(),
            })
            .collect();
        Self {
            columns,
            detail: None,
            decoded: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    InColumns,
    InDetail,
}

/// Streaming classifier; feed rows in order with [`push`](Self::push)
#[derive(Debug)]
pub struct RowClassifier {
    mode: DetailedTableInfoMode,
    state: ScanState,
    output: Classification,
}

impl RowClassifier {
    pub fn new(mode: DetailedTableInfoMode) -> Self {
        Self {
            mode,
            state: ScanState::InColumns,
            output: Classification::default(),
        }
    }

    pub fn push(&mut self, row: MetadataRow) {
        match self.state {
            ScanState::InColumns => {
                if row.has_blank_label() {
                    self.state = ScanState::InDetail;
                    return;
                }
                self.output.columns.push(ColumnDescriptor {
                    name: row.label.unwrap_or_default(),
                    data_type: row.type_text.unwrap_or_default(),
                    description: row.comment.unwrap_or_default(),
                });
            }
            ScanState::InDetail => {
                if row.label.as_deref() != Some(DETAIL_SECTION_LABEL) {
                    return;
                }
                let text = row.type_text.unwrap_or_default();
                // a repeated sentinel row overwrites the earlier capture, unless it is blank
                if text.trim().is_empty() {
                    self.output.detail.get_or_insert(DetailBlob(text));
                    return;
                }
                self.output.decoded = decode(&text, self.mode);
                self.output.detail = Some(DetailBlob(text));
            }
        }
    }

    pub fn finish(self) -> Classification {
        self.output
    }
}

/// Classify a complete describe result
pub fn classify<I>(rows: I, mode: DetailedTableInfoMode) -> Classification
where
    I: IntoIterator<Item = MetadataRow>,
{
    let mut classifier = RowClassifier::new(mode);
    for row in rows {
        classifier.push(row);
    }
    classifier.finish()
}
