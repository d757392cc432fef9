//! Configuration handling for tablejoin

/// Sentinel written into cells that are absent because of an outer join.
pub const BLANK_CELL_VALUE: &str = "";

/// Default name of the sample column in CRAM/CRAI tables.
pub const DEFAULT_SAMPLE_COLUMN: &str = "sample";

/// Output format for tables printed by the CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// What to do with samples that have only a CRAM or only a CRAI object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Leave them out of the table; they are still reported.
    #[default]
    Drop,
    /// Keep them, with the blank sentinel in the missing cell.
    BlankFill,
}

impl std::str::FromStr for UnmatchedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(UnmatchedPolicy::Drop),
            "blank-fill" | "blank_fill" | "blank" => Ok(UnmatchedPolicy::BlankFill),
            _ => Err(format!("Unknown unmatched policy: {}", s)),
        }
    }
}

/// Configuration for table operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Value used for cells missing after an outer join
    pub blank_cell_value: String,
    /// Name of the sample column in generated CRAM/CRAI tables
    pub sample_column: String,
    /// Handling of unpaired CRAM/CRAI samples
    pub unmatched_policy: UnmatchedPolicy,
    /// Read the source tables of a join in parallel
    pub parallel_reads: bool,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blank_cell_value: BLANK_CELL_VALUE.to_string(),
            sample_column: DEFAULT_SAMPLE_COLUMN.to_string(),
            unmatched_policy: UnmatchedPolicy::default(),
            parallel_reads: true,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the blank sentinel
    pub fn with_blank_cell_value(mut self, value: impl Into<String>) -> Self {
        self.blank_cell_value = value.into();
        self
    }

    /// Set the sample column name for CRAM/CRAI tables
    pub fn with_sample_column(mut self, column: impl Into<String>) -> Self {
        self.sample_column = column.into();
        self
    }

    /// Set the unmatched sample policy
    pub fn with_unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched_policy = policy;
        self
    }

    /// Enable or disable parallel table reads
    pub fn with_parallel_reads(mut self, parallel: bool) -> Self {
        self.parallel_reads = parallel;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.blank_cell_value, "");
        assert_eq!(config.sample_column, "sample");
        assert_eq!(config.unmatched_policy, UnmatchedPolicy::Drop);
        assert!(config.parallel_reads);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("drop".parse(), Ok(UnmatchedPolicy::Drop));
        assert_eq!("Blank-Fill".parse(), Ok(UnmatchedPolicy::BlankFill));
        assert!("keep".parse::<UnmatchedPolicy>().is_err());
    }
}
