use smol_str::SmolStr;

use crate::constants::{CHROME_TYPE, DEFAULT_MAX_DEPTH, DISCONNECTED_DATASOURCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasourceMode {
    #[default]
    Connected,
    Disconnected,
}

impl DatasourceMode {
    /// Datasource given to components whose source object carries none.
    pub fn default_datasource(self) -> &'static str {
        match self {
            DatasourceMode::Connected => "",
            DatasourceMode::Disconnected => DISCONNECTED_DATASOURCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub strict: bool,
    pub max_depth: usize,
    pub datasource_mode: DatasourceMode,
    pub chrome_type: SmolStr,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_datasource_mode(mut self, datasource_mode: DatasourceMode) -> Self {
        self.datasource_mode = datasource_mode;
        self
    }

    pub fn with_chrome_type(mut self, chrome_type: impl Into<SmolStr>) -> Self {
        self.chrome_type = chrome_type.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
            datasource_mode: DatasourceMode::default(),
            chrome_type: SmolStr::new_static(CHROME_TYPE),
        }
    }
}
