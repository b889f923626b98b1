use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::core::domain::{MonthDataset, MonthKey};
use crate::core::error::InsightsError;
use crate::parsing::csv_parser;

/// One of the five exported tables of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthTable {
    Bookings,
    Tours,
    Guides,
    GuideAvailability,
    GuideSkills,
}

impl MonthTable {
    pub const ALL: [MonthTable; 5] = [
        MonthTable::Bookings,
        MonthTable::Tours,
        MonthTable::Guides,
        MonthTable::GuideAvailability,
        MonthTable::GuideSkills,
    ];

    /// File name prefix used by the exports.
    pub fn prefix(&self) -> &'static str {
        match self {
            MonthTable::Bookings => "bookings",
            MonthTable::Tours => "tours",
            MonthTable::Guides => "guides",
            MonthTable::GuideAvailability => "guide_avail",
            MonthTable::GuideSkills => "guide_skills",
        }
    }

    /// File name for `month`, e.g. `bookings_03-2025.csv`.
    pub fn file_name(&self, month: MonthKey) -> String {
        format!("{}_{}.csv", self.prefix(), month.file_suffix())
    }
}

/// Loads monthly CSV exports from a directory.
#[derive(Debug, Clone)]
pub struct MonthLoader {
    directory: PathBuf,
}

impl MonthLoader {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn table_path(&self, table: MonthTable, month: MonthKey) -> PathBuf {
        self.directory.join(table.file_name(month))
    }

    /// Whether every table of `month` is present.
    pub fn has_month(&self, month: MonthKey) -> bool {
        MonthTable::ALL
            .iter()
            .all(|table| self.table_path(*table, month).is_file())
    }

    /// Load and type all five tables of `month`.
    pub fn load_month(&self, month: MonthKey) -> Result<MonthDataset> {
        let mut dataset = MonthDataset::new(month);

        dataset.bookings =
            self.read_table(MonthTable::Bookings, month, csv_parser::parse_bookings)?;
        dataset.tours = self.read_table(MonthTable::Tours, month, csv_parser::parse_tours)?;
        dataset.guides = self.read_table(MonthTable::Guides, month, csv_parser::parse_guides)?;
        dataset.availability = self.read_table(
            MonthTable::GuideAvailability,
            month,
            csv_parser::parse_availability,
        )?;
        dataset.skills =
            self.read_table(MonthTable::GuideSkills, month, csv_parser::parse_skills)?;

        log::info!(
            "{}: loaded {} bookings, {} tours, {} guides, {} availability rows, {} skills from {}",
            month,
            dataset.bookings.len(),
            dataset.tours.len(),
            dataset.guides.len(),
            dataset.availability.len(),
            dataset.skills.len(),
            self.directory.display()
        );
        Ok(dataset)
    }

    /// Load several months, failing on the first that cannot be read.
    pub fn load_months(&self, months: &[MonthKey]) -> Result<Vec<MonthDataset>> {
        months.iter().map(|month| self.load_month(*month)).collect()
    }

    fn read_table<T, F>(&self, table: MonthTable, month: MonthKey, parse: F) -> Result<Vec<T>>
    where
        F: FnOnce(BufReader<File>) -> Result<Vec<T>>,
    {
        let path = self.table_path(table, month);
        let file = File::open(&path)
            .map_err(|err| load_error(&path, &err))
            .with_context(|| format!("Failed to open {}", path.display()))?;
        parse(BufReader::new(file))
            .map_err(|err| load_error(&path, &format!("{:#}", err)))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Typed load failure naming the file; the cause carries the row when known.
fn load_error(path: &Path, cause: &dyn std::fmt::Display) -> InsightsError {
    InsightsError::LoadError(format!("{}: {}", path.display(), cause))
}
