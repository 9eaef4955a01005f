//! Payload model for the data endpoint.
//!
//! The endpoint returns one JSON object whose keys are independent, optional
//! sections. Each section is decoded on its own: a section with an unexpected
//! shape is dropped (and logged) without affecting the others.
//!
//! Record key order is preserved as received (`serde_json` is built with
//! `preserve_order`), which is what column inference relies on.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One row of tabular data: field name -> display value, in document order.
pub type Record = Map<String, Value>;

const KEY_COMPANY: &str = "json_company_data";
const KEY_EMPLOYEE: &str = "json_employee_data";
const KEY_CSV: &str = "cleaned_csv";
const KEY_PDF: &str = "cleaned_pdf";
const KEY_PPTX: &str = "cleaned_pptx";
const KEY_PPTX_TABLES: &str = "pptx_tables";
const KEY_PPTX_TEXT: &str = "pptx_text";

/// A named array of records (one CSV file, one PDF table, one PPTX table).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    pub name: String,
    pub records: Vec<Record>,
}

/// Extracted text of one presentation slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideText {
    #[serde(rename = "Slide", default)]
    pub slide: Value,
    #[serde(rename = "Content", default)]
    pub content: Option<String>,
    #[serde(rename = "File", default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "Source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SlideText {
    /// `Slide N: content` line used by the slide list.
    pub fn display_line(&self) -> String {
        format!(
            "Slide {}: {}",
            display_value(&self.slide),
            self.content.as_deref().unwrap_or_default()
        )
    }
}

/// Decoded payload. `None` sections were absent, `null`, or malformed.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub company: Option<Vec<Record>>,
    pub employee: Option<Vec<Record>>,
    pub csv: Option<Vec<RecordGroup>>,
    pub pdf: Option<Vec<RecordGroup>>,
    pub pptx_tables: Option<Vec<RecordGroup>>,
    pub pptx_text: Option<Vec<SlideText>>,
    raw: Value,
}

impl Payload {
    /// Decodes every known section of `raw`, keeping `raw` for the dump view.
    pub fn from_value(raw: Value) -> Self {
        let Some(obj) = raw.as_object() else {
            warn!(kind = json_kind(&raw), "payload is not a JSON object");
            return Self {
                raw,
                ..Self::default()
            };
        };

        let pptx = match obj.get(KEY_PPTX) {
            Some(Value::Object(pptx)) => Some(pptx),
            Some(Value::Null) | None => None,
            Some(other) => {
                warn!(
                    section = KEY_PPTX,
                    kind = json_kind(other),
                    "ignoring malformed payload section"
                );
                None
            }
        };

        let company = decode_section(obj, KEY_COMPANY);
        let employee = decode_section(obj, KEY_EMPLOYEE);
        let csv = decode_groups(obj, KEY_CSV);
        let pdf = decode_groups(obj, KEY_PDF);
        let pptx_tables = pptx.and_then(|p| decode_groups(p, KEY_PPTX_TABLES));
        let pptx_text = pptx.and_then(|p| decode_section(p, KEY_PPTX_TEXT));

        Self {
            company,
            employee,
            csv,
            pdf,
            pptx_tables,
            pptx_text,
            raw,
        }
    }

    /// The payload exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// All sections in display order, present or not.
    pub fn sections(&self) -> Vec<Section<'_>> {
        SectionKind::all()
            .iter()
            .map(|&kind| Section {
                kind,
                body: self.body(kind),
            })
            .collect()
    }

    fn body(&self, kind: SectionKind) -> Option<SectionBody<'_>> {
        match kind {
            SectionKind::Company => self.company.as_deref().map(SectionBody::Records),
            SectionKind::Employee => self.employee.as_deref().map(SectionBody::Records),
            SectionKind::Csv => self.csv.as_deref().map(SectionBody::Groups),
            SectionKind::Pdf => self.pdf.as_deref().map(SectionBody::Groups),
            SectionKind::PptxTables => self.pptx_tables.as_deref().map(SectionBody::Groups),
            SectionKind::PptxText => self.pptx_text.as_deref().map(SectionBody::Slides),
        }
    }

    /// Short description for logging, e.g. `company=3 employee=12 csv=2/40`.
    pub fn summary(&self) -> String {
        self.sections()
            .iter()
            .map(|s| format!("{}={}", s.kind.key(), s.describe()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Known payload sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Company,
    Employee,
    Csv,
    Pdf,
    PptxTables,
    PptxText,
}

impl SectionKind {
    pub fn all() -> &'static [SectionKind] {
        &[
            SectionKind::Company,
            SectionKind::Employee,
            SectionKind::Csv,
            SectionKind::Pdf,
            SectionKind::PptxTables,
            SectionKind::PptxText,
        ]
    }

    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Company => "Company Data",
            SectionKind::Employee => "Employee Data",
            SectionKind::Csv => "CSV Data",
            SectionKind::Pdf => "PDF Data",
            SectionKind::PptxTables => "PPTX Data",
            SectionKind::PptxText => "PPTX Slide Text",
        }
    }

    /// Placeholder shown when the section is absent or empty.
    pub fn placeholder(&self) -> &'static str {
        match self {
            SectionKind::Company => "No company data available.",
            SectionKind::Employee => "No employee data available.",
            SectionKind::Csv => "No CSV data available.",
            SectionKind::Pdf => "No PDF data available.",
            SectionKind::PptxTables => "No PPTX data available.",
            SectionKind::PptxText => "No PPTX text available.",
        }
    }

    /// Short name used in logs.
    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Company => "company",
            SectionKind::Employee => "employee",
            SectionKind::Csv => "csv",
            SectionKind::Pdf => "pdf",
            SectionKind::PptxTables => "pptx_tables",
            SectionKind::PptxText => "pptx_text",
        }
    }
}

/// Borrowed content of a present section.
#[derive(Debug, Clone, Copy)]
pub enum SectionBody<'a> {
    Records(&'a [Record]),
    Groups(&'a [RecordGroup]),
    Slides(&'a [SlideText]),
}

impl SectionBody<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionBody::Records(r) => r.is_empty(),
            SectionBody::Groups(g) => g.is_empty(),
            SectionBody::Slides(s) => s.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub body: Option<SectionBody<'a>>,
}

impl Section<'_> {
    /// True when the section should render its placeholder.
    pub fn is_empty(&self) -> bool {
        self.body.is_none_or(|b| b.is_empty())
    }

    fn describe(&self) -> String {
        match self.body {
            None => "-".to_string(),
            Some(SectionBody::Records(r)) => r.len().to_string(),
            Some(SectionBody::Slides(s)) => s.len().to_string(),
            Some(SectionBody::Groups(g)) => {
                let rows: usize = g.iter().map(|grp| grp.records.len()).sum();
                format!("{}/{}", g.len(), rows)
            }
        }
    }
}

/// Display form of a record value: strings verbatim, `null` as empty.
/// Integral floats print without a fraction (`1.0` as `1`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn decode_section<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    let value = obj.get(key).filter(|v| !v.is_null())?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(section = key, error = %e, "ignoring malformed payload section");
            None
        }
    }
}

fn decode_groups(obj: &Map<String, Value>, key: &str) -> Option<Vec<RecordGroup>> {
    let groups: Map<String, Value> = decode_section(obj, key)?;
    let mut decoded = Vec::with_capacity(groups.len());
    for (name, value) in groups {
        // A `null` group is kept and shown as an empty table.
        let records = match Option::<Vec<Record>>::deserialize(&value) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                warn!(section = key, group = %name, error = %e, "ignoring malformed payload section");
                return None;
            }
        };
        decoded.push(RecordGroup { name, records });
    }
    Some(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
