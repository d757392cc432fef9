//! Sample/file inference from flat object listings

mod builder;
mod classify;

pub use builder::{
    build_cram_crai_table, CramCraiTable, ListingBuilder, ListingReport, CRAI_COLUMN, CRAM_COLUMN,
};
pub use classify::{classify, file_name, Classified, FileKind};
