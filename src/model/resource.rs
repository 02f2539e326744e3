use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the resources sheet
///
/// The fields the probes inspect are named; every other column is kept verbatim
/// in `extra` under its normalized header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub database_name: Option<String>,
    pub purl: Option<String>,
    pub database_home_page_should_contain_text: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ResourceRecord {
    /// Creates a record with only a database name
    pub fn named(database_name: impl Into<String>) -> Self {
        Self {
            database_name: Some(database_name.into()),
            ..Self::default()
        }
    }

    /// Sets the PURL
    pub fn with_purl(mut self, purl: impl Into<String>) -> Self {
        self.purl = Some(purl.into());
        self
    }

    /// Sets the text expected on the PURL's landing page
    pub fn with_expected_text(mut self, text: impl Into<String>) -> Self {
        self.database_home_page_should_contain_text = Some(text.into());
        self
    }

    /// Assigns a cell to its named field or to `extra`
    ///
    /// Blank cells leave the field unset.
    pub fn set(&mut self, key: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let value = value.to_string();
        match key {
            "database_name" => self.database_name = Some(value),
            "purl" => self.purl = Some(value),
            "database_home_page_should_contain_text" => {
                self.database_home_page_should_contain_text = Some(value)
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Database name, if present and non-blank
    pub fn name(&self) -> Option<&str> {
        non_blank(self.database_name.as_deref())
    }

    /// PURL, if present and non-blank
    pub fn purl(&self) -> Option<&str> {
        non_blank(self.purl.as_deref())
    }

    /// Expected landing-page text, if present and non-blank
    pub fn expected_text(&self) -> Option<&str> {
        non_blank(self.database_home_page_should_contain_text.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
