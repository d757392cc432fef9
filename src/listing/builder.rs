//! Build a CRAM/CRAI table from an object listing

use std::collections::BTreeMap;

use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::{Config, UnmatchedPolicy};
use crate::error::Result;
use crate::model::ColumnTable;

use super::classify::{classify, file_name, FileKind};

/// Column holding the CRAM object key.
pub const CRAM_COLUMN: &str = "cram";
/// Column holding the CRAI object key.
pub const CRAI_COLUMN: &str = "crai";

/// What happened to the objects of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingReport {
    /// Samples written to the table
    pub samples: usize,
    /// Samples with a CRAM but no CRAI
    pub unmatched_cram: Vec<String>,
    /// Samples with a CRAI but no CRAM
    pub unmatched_crai: Vec<String>,
    /// Keys that were neither CRAM nor CRAI
    pub skipped: Vec<String>,
}

impl ListingReport {
    /// True when every CRAM had a CRAI and vice versa
    pub fn is_paired(&self) -> bool {
        self.unmatched_cram.is_empty() && self.unmatched_crai.is_empty()
    }
}

/// A built table with its report.
#[derive(Debug, Clone)]
pub struct CramCraiTable {
    pub table: ColumnTable,
    pub report: ListingReport,
}

/// Groups listed object keys by sample into `(sample, cram, crai)` rows.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    sample_column: String,
    policy: UnmatchedPolicy,
    blank: String,
}

impl ListingBuilder {
    /// Create a builder from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            sample_column: config.sample_column.clone(),
            policy: config.unmatched_policy,
            blank: config.blank_cell_value.clone(),
        }
    }

    /// Classify every key and reconcile CRAMs with CRAIs.
    ///
    /// Only the last path segment of a key is classified; the full key is
    /// stored. A later key for the same sample and kind replaces an earlier
    /// one.
    pub fn build<I, S>(&self, keys: I) -> Result<CramCraiTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut crams: BTreeMap<String, String> = BTreeMap::new();
        let mut crais: BTreeMap<String, String> = BTreeMap::new();
        let mut report = ListingReport::default();

        for key in keys {
            let key = key.as_ref();
            let classified = classify(file_name(key))?;
            let target = match classified.kind {
                FileKind::Cram => &mut crams,
                FileKind::Crai => &mut crais,
                FileKind::Other => {
                    debug!("skipping {}", key);
                    report.skipped.push(key.to_string());
                    continue;
                }
            };
            target.insert(classified.sample.to_string(), key.to_string());
        }

        let samples = self.reconcile(&crams, &crais, &mut report);

        for sample in &report.unmatched_cram {
            warn!("sample {} has a cram but no crai", sample);
        }
        for sample in &report.unmatched_crai {
            warn!("sample {} has a crai but no cram", sample);
        }

        let lookup = |map: &BTreeMap<String, String>, sample: &str| {
            map.get(sample).cloned().unwrap_or_else(|| self.blank.clone())
        };
        let mut table = ColumnTable::new();
        table.insert_column(
            self.sample_column.clone(),
            samples.iter().map(|s| s.to_string()).collect(),
        );
        table.insert_column(
            CRAM_COLUMN,
            samples.iter().map(|&s| lookup(&crams, s)).collect(),
        );
        table.insert_column(
            CRAI_COLUMN,
            samples.iter().map(|&s| lookup(&crais, s)).collect(),
        );

        report.samples = samples.len();
        info!(
            "{} samples from {} crams and {} crais",
            report.samples,
            crams.len(),
            crais.len()
        );

        Ok(CramCraiTable { table, report })
    }

    /// Sorted samples to emit; fills the unmatched lists of `report`.
    fn reconcile<'a>(
        &self,
        crams: &'a BTreeMap<String, String>,
        crais: &'a BTreeMap<String, String>,
        report: &mut ListingReport,
    ) -> Vec<&'a str> {
        if crams.len() == crais.len() && crams.keys().eq(crais.keys()) {
            return crams.keys().map(String::as_str).collect();
        }

        let cram_samples: FxHashSet<&str> = crams.keys().map(String::as_str).collect();
        let crai_samples: FxHashSet<&str> = crais.keys().map(String::as_str).collect();

        report.unmatched_cram = crams
            .keys()
            .filter(|s| !crai_samples.contains(s.as_str()))
            .cloned()
            .collect();
        report.unmatched_crai = crais
            .keys()
            .filter(|s| !cram_samples.contains(s.as_str()))
            .cloned()
            .collect();

        match self.policy {
            UnmatchedPolicy::Drop => crams
                .keys()
                .map(String::as_str)
                .filter(|s| crai_samples.contains(s))
                .collect(),
            UnmatchedPolicy::BlankFill => {
                let mut all: Vec<&str> = cram_samples.union(&crai_samples).copied().collect();
                all.sort_unstable();
                all
            }
        }
    }
}

/// Build a CRAM/CRAI table with the given configuration.
pub fn build_cram_crai_table<I, S>(keys: I, config: &Config) -> Result<CramCraiTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ListingBuilder::new(config).build(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn column<'a>(table: &'a ColumnTable, name: &str) -> Vec<&'a str> {
        table
            .column(name)
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_paired_listing_sorted() {
        let listing = [
            "gs://b/p/NWD2.cram",
            "gs://b/p/NWD2.crai",
            "gs://b/p/NWD1.cram",
            "gs://b/p/NWD1.cram.crai",
        ];
        let built = build_cram_crai_table(listing, &Config::default()).unwrap();

        assert_eq!(column(&built.table, "sample"), vec!["NWD1", "NWD2"]);
        assert_eq!(
            column(&built.table, "cram"),
            vec!["gs://b/p/NWD1.cram", "gs://b/p/NWD2.cram"]
        );
        assert_eq!(
            column(&built.table, "crai"),
            vec!["gs://b/p/NWD1.cram.crai", "gs://b/p/NWD2.crai"]
        );
        assert!(built.report.is_paired());
        assert_eq!(built.report.samples, 2);
    }

    #[test]
    fn test_unmatched_samples_dropped_and_reported() {
        let listing = ["p/A.cram", "p/A.crai", "p/B.cram", "p/C.cram"];
        let built = build_cram_crai_table(listing, &Config::default()).unwrap();

        assert_eq!(column(&built.table, "sample"), vec!["A"]);
        assert_eq!(built.report.unmatched_cram, vec!["B", "C"]);
        assert!(built.report.unmatched_crai.is_empty());
    }

    #[test]
    fn test_equal_counts_with_different_samples() {
        let listing = ["p/A.cram", "p/B.cram", "p/A.crai", "p/C.crai"];
        let built = build_cram_crai_table(listing, &Config::default()).unwrap();

        assert_eq!(column(&built.table, "sample"), vec!["A"]);
        assert_eq!(built.report.unmatched_cram, vec!["B"]);
        assert_eq!(built.report.unmatched_crai, vec!["C"]);
    }

    #[test]
    fn test_blank_fill_keeps_unmatched() {
        let config = Config::default()
            .with_unmatched_policy(UnmatchedPolicy::BlankFill)
            .with_blank_cell_value("-");
        let listing = ["p/B.crai", "p/A.cram", "p/A.crai", "p/C.cram"];
        let built = build_cram_crai_table(listing, &config).unwrap();

        assert_eq!(column(&built.table, "sample"), vec!["A", "B", "C"]);
        assert_eq!(column(&built.table, "cram"), vec!["p/A.cram", "-", "p/C.cram"]);
        assert_eq!(column(&built.table, "crai"), vec!["p/A.crai", "p/B.crai", "-"]);
    }

    #[test]
    fn test_other_files_skipped() {
        let listing = ["p/A.cram", "p/A.crai", "p/A.bam", "p/notes.txt"];
        let built = build_cram_crai_table(listing, &Config::default()).unwrap();

        assert_eq!(column(&built.table, "sample"), vec!["A"]);
        assert_eq!(built.report.skipped, vec!["p/A.bam", "p/notes.txt"]);
    }

    #[test]
    fn test_unparseable_name_fails() {
        let err = build_cram_crai_table(["p/A.cram", "p/a.b.c.d"], &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::Parse { filename } if filename == "a.b.c.d"));
    }

    #[test]
    fn test_one_sided_listing_is_empty() {
        let built = build_cram_crai_table(["p/A.cram"], &Config::default()).unwrap();
        assert!(built.table.is_empty());
        assert_eq!(built.report.unmatched_cram, vec!["A"]);
    }

    #[test]
    fn test_custom_sample_column() {
        let config = Config::default().with_sample_column("sample_id");
        let built = build_cram_crai_table(["A.cram", "A.crai"], &config).unwrap();
        assert_eq!(column(&built.table, "sample_id"), vec!["A"]);
    }
}
