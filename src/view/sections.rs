//! Section layout of the App view.
//!
//! Every payload section goes through [`render_section`], which turns it into
//! one or more [`Panel`]s: a table per record array, a slide list, or the
//! section's placeholder.

use crate::payload::{Payload, Section, SectionBody, SectionKind};
use crate::view::table::{ColumnPolicy, TableView};

/// What a panel shows.
#[derive(Debug, Clone)]
pub enum PanelBody {
    /// Records table (may itself be empty, see [`TableView::is_empty`]).
    Table(TableView),
    /// `Slide N: content` lines.
    Slides(Vec<String>),
    /// Section is absent or empty.
    Placeholder(&'static str),
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub kind: SectionKind,
    /// Group name for CSV / PDF / PPTX table groups.
    pub group: Option<String>,
    pub body: PanelBody,
}

impl Panel {
    pub fn heading(&self) -> &'static str {
        self.kind.heading()
    }

    /// `Heading` or `Heading / group`.
    pub fn title(&self) -> String {
        match &self.group {
            Some(group) => format!("{} / {}", self.heading(), group),
            None => self.heading().to_string(),
        }
    }

    pub fn table(&self) -> Option<&TableView> {
        match &self.body {
            PanelBody::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut TableView> {
        match &mut self.body {
            PanelBody::Table(t) => Some(t),
            _ => None,
        }
    }
}

/// Builds the panels of the App view. `None` (failed fetch) shows every
/// section's placeholder.
pub fn build_panels(payload: Option<&Payload>, policy: ColumnPolicy) -> Vec<Panel> {
    let sections = match payload {
        Some(p) => p.sections(),
        None => SectionKind::all()
            .iter()
            .map(|&kind| Section { kind, body: None })
            .collect(),
    };

    let mut panels = Vec::new();
    for section in sections {
        render_section(section, policy, &mut panels);
    }
    panels
}

/// Appends the panels for one section.
pub fn render_section(section: Section<'_>, policy: ColumnPolicy, out: &mut Vec<Panel>) {
    let kind = section.kind;
    let body = match section.body {
        Some(body) if !body.is_empty() => body,
        _ => {
            out.push(Panel {
                kind,
                group: None,
                body: PanelBody::Placeholder(kind.placeholder()),
            });
            return;
        }
    };

    match body {
        SectionBody::Records(records) => out.push(Panel {
            kind,
            group: None,
            body: PanelBody::Table(TableView::new(records, policy)),
        }),
        SectionBody::Groups(groups) => {
            out.extend(groups.iter().map(|g| Panel {
                kind,
                group: Some(g.name.clone()),
                body: PanelBody::Table(TableView::new(&g.records, policy)),
            }));
        }
        SectionBody::Slides(slides) => out.push(Panel {
            kind,
            group: None,
            body: PanelBody::Slides(slides.iter().map(|s| s.display_line()).collect()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn panels_for(value: serde_json::Value) -> Vec<Panel> {
        build_panels(
            Some(&Payload::from_value(value)),
            ColumnPolicy::FirstRecord,
        )
    }

    fn placeholder(panel: &Panel) -> Option<&'static str> {
        match panel.body {
            PanelBody::Placeholder(p) => Some(p),
            _ => None,
        }
    }

    #[test]
    fn failed_fetch_shows_every_placeholder() {
        let panels = build_panels(None, ColumnPolicy::FirstRecord);
        let texts: Vec<&str> = panels.iter().filter_map(placeholder).collect();
        assert_eq!(
            texts,
            vec![
                "No company data available.",
                "No employee data available.",
                "No CSV data available.",
                "No PDF data available.",
                "No PPTX data available.",
                "No PPTX text available.",
            ]
        );
    }

    #[test]
    fn empty_company_and_single_employee() {
        let panels = panels_for(json!({
            "json_company_data": [],
            "json_employee_data": [{"name": "Acme", "id": 1}]
        }));

        assert_eq!(panels[0].kind, SectionKind::Company);
        assert_eq!(placeholder(&panels[0]), Some("No company data available."));

        assert_eq!(panels[1].kind, SectionKind::Employee);
        let table = panels[1].table().unwrap();
        assert_eq!(table.columns(), ["name", "id"]);
        assert_eq!(table.page_rows(), vec![["Acme".to_string(), "1".to_string()]]);
    }

    #[test]
    fn groups_become_one_panel_each_in_order() {
        let panels = panels_for(json!({
            "cleaned_csv": {
                "members": [{"Name": "A"}],
                "visits": [{"Date": "2024-01-01"}]
            },
            "cleaned_pdf": {"report_table1": []},
            "cleaned_pptx": {
                "pptx_tables": {"deck_Slide2_Table1": [{"Q": "Q1"}]},
                "pptx_text": [{"Slide": 1, "Content": "Intro"}, {"Slide": 2, "Content": "Numbers"}]
            }
        }));

        let titles: Vec<String> = panels.iter().map(Panel::title).collect();
        assert_eq!(
            titles,
            vec![
                "Company Data",
                "Employee Data",
                "CSV Data / members",
                "CSV Data / visits",
                "PDF Data / report_table1",
                "PPTX Data / deck_Slide2_Table1",
                "PPTX Slide Text",
            ]
        );

        // Empty group inside a non-empty mapping renders the table placeholder.
        assert!(panels[4].table().unwrap().is_empty());

        match &panels[6].body {
            PanelBody::Slides(lines) => {
                assert_eq!(lines, &["Slide 1: Intro", "Slide 2: Numbers"]);
            }
            other => panic!("expected slides, got {other:?}"),
        }
    }

    #[test]
    fn empty_group_mapping_is_section_placeholder() {
        let panels = panels_for(json!({"cleaned_csv": {}, "cleaned_pptx": {"pptx_text": []}}));
        let csv = panels.iter().find(|p| p.kind == SectionKind::Csv).unwrap();
        assert_eq!(placeholder(csv), Some("No CSV data available."));
        let text = panels
            .iter()
            .find(|p| p.kind == SectionKind::PptxText)
            .unwrap();
        assert_eq!(placeholder(text), Some("No PPTX text available."));
    }

    #[test]
    fn tables_have_independent_state() {
        let mut panels = panels_for(json!({
            "cleaned_csv": {
                "a": [{"x": "alpha"}, {"x": "beta"}],
                "b": [{"x": "alpha"}, {"x": "beta"}]
            }
        }));
        panels[2].table_mut().unwrap().set_filter("alp");
        assert_eq!(panels[2].table().unwrap().filtered_len(), 1);
        assert_eq!(panels[3].table().unwrap().filtered_len(), 2);
    }
}
