/// Per-item enrichment data. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetailResult {
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
}

impl DetailResult {
    pub fn new(backdrop: Option<String>, overview: Option<String>) -> Self {
        Self { backdrop, overview }
    }

    /// Backdrop reference, treating blank strings as absent.
    pub fn backdrop(&self) -> Option<&str> {
        non_blank(self.backdrop.as_deref())
    }

    pub fn overview(&self) -> Option<&str> {
        non_blank(self.overview.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
