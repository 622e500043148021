//! Profile pipeline: sequences loading, matching, generation and write-back.
//!
//! Flow: load profile book → load roster → for each row without a profile:
//!       match name → generate profile → store → pause → write roster back once.
//!
//! Load failures abort the run. A failed write-back is logged and the run still
//! counts as complete; progress from this run is lost in that case.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::document::{load_document, DocumentCorpus};
use crate::matcher::NameMatcher;
use crate::profile::ProfileGenerator;
use crate::roster::{load_roster, write_profiles, Roster};

/// Fixed pause after each model call.
pub const REQUEST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub generated: usize,
    pub skipped: usize,
    /// Cells written back, or `None` when the write-back failed.
    pub written: Option<usize>,
}

pub struct Pipeline {
    matcher: NameMatcher,
    generator: ProfileGenerator,
    delay: Duration,
}

impl Pipeline {
    pub fn new(matcher: NameMatcher, generator: ProfileGenerator) -> Self {
        Self {
            matcher,
            generator,
            delay: REQUEST_DELAY,
        }
    }

    /// Full run against files on disk.
    pub async fn run(&self, profile_book: &Path, roster_path: &Path) -> Result<RunSummary> {
        info!(
            "Loading profile book data from {}...",
            profile_book.display()
        );
        let corpus = load_document(profile_book)?;
        info!(
            "Loaded {} pages ({} characters) of profile book text",
            corpus.page_count,
            corpus.text.chars().count()
        );

        self.process_roster(roster_path, &corpus).await
    }

    /// Loads the roster, enriches it against `corpus` and writes it back in place.
    pub async fn process_roster(
        &self,
        roster_path: &Path,
        corpus: &DocumentCorpus,
    ) -> Result<RunSummary> {
        info!("Loading customer data from {}...", roster_path.display());
        let mut roster = load_roster(roster_path)?;
        info!("Found {} customers to process", roster.len());
        if roster.is_empty() {
            warn!(
                "{} has no customer rows below the header",
                roster_path.display()
            );
        }

        let missing = roster.missing_columns();
        if !missing.is_empty() {
            warn!("Roster is missing expected columns: {}", missing.join(", "));
        }

        let mut summary = self.enrich(&mut roster, corpus).await;

        info!("Updating {}...", roster_path.display());
        match write_profiles(roster_path, &roster) {
            Ok(written) => {
                info!(
                    "Successfully updated {} with generated profiles!",
                    roster_path.display()
                );
                summary.written = Some(written);
            }
            Err(e) => error!("Error updating spreadsheet: {e}"),
        }

        Ok(summary)
    }

    /// Fills in `profile` for every record that lacks one, in row order.
    pub async fn enrich(&self, roster: &mut Roster, corpus: &DocumentCorpus) -> RunSummary {
        let total = roster.len();
        let mut summary = RunSummary {
            total,
            ..RunSummary::default()
        };

        for (i, record) in roster.records.iter_mut().enumerate() {
            let first_name = record.first_name();
            let last_name = record.last_name();
            let city = record.city();

            info!(
                "Processing {}/{}: {} {} from {}",
                i + 1,
                total,
                first_name,
                last_name,
                city
            );

            if record.has_profile() {
                info!("  Profile already exists, skipping...");
                summary.skipped += 1;
                continue;
            }

            let context = self
                .matcher
                .find_person_context(&first_name, &last_name, &corpus.text);
            let profile = self
                .generator
                .generate(&first_name, &last_name, &city, &context)
                .await;

            info!(
                "  Generated profile ({} characters)",
                profile.chars().count()
            );
            record.set_profile(profile);
            summary.generated += 1;

            tokio::time::sleep(self.delay).await;
        }

        summary
    }
}
