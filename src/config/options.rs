// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Runtime-resolved settings. Defaults are the fixed constants; the CLI
/// may override the output locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub endpoint: String,
    pub categories: Vec<String>,
    pub sort: String,
    pub page_size: usize,
    pub user_agent: String,
    /// Where the full-export snapshot lands.
    pub out_dir: PathBuf,
    /// Where the periodic archives and legends live.
    pub data_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: s!(BROWSE_URL),
            categories: CATEGORIES.iter().map(|c| s!(*c)).collect(),
            sort: s!(SORT),
            page_size: PAGE_SIZE,
            user_agent: s!(USER_AGENT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            data_dir: PathBuf::from(PERIODIC_DIR),
        }
    }
}

impl Options {
    /// Query URL for one category. The category goes in verbatim
    /// (`coolers/ciders` keeps its slash).
    pub fn category_url(&self, category: &str) -> String {
        format!(
            "{}?category={}&sort={}&size={}",
            self.endpoint, category, self.sort, self.page_size
        )
    }

    pub fn with_out_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir { self.out_dir = d; }
        self
    }

    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(d) = dir { self.data_dir = d; }
        self
    }

    pub fn snapshot_csv(&self) -> PathBuf { self.out_dir.join(SNAPSHOT_CSV) }
    pub fn snapshot_json(&self) -> PathBuf { self.out_dir.join(SNAPSHOT_JSON) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_urls_match_fixed_queries() {
        let opts = Options::default();
        let urls: Vec<String> = opts.categories.iter().map(|c| opts.category_url(c)).collect();
        assert_eq!(urls.len(), 4);
        assert_eq!(
            urls[0],
            "https://www.bcliquorstores.com/ajax/browse?category=wine&sort=name.raw:asc&size=5000"
        );
        assert_eq!(
            urls[3],
            "https://www.bcliquorstores.com/ajax/browse?category=coolers/ciders&sort=name.raw:asc&size=5000"
        );
    }

    #[test]
    fn overrides_only_touch_given_dirs() {
        let opts = Options::default()
            .with_out_dir(Some(PathBuf::from("snap")))
            .with_data_dir(None);
        assert_eq!(opts.snapshot_csv(), PathBuf::from("snap").join(SNAPSHOT_CSV));
        assert_eq!(opts.data_dir, PathBuf::from(PERIODIC_DIR));
    }
}
