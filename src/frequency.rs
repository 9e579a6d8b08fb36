use crate::error::{FigureError, Result};
use crate::util::{weighted_mean, weighted_std_dev};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

/// One CSV row as emitted by the avalanche measurement tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    pub hamming_distance: u32,
    pub count: u64,
}

/// Observed count per hamming distance. Keys are unique and the table is
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: BTreeMap<u32, u64>,
}

impl FrequencyTable {
    /// Build a table from `(distance, count)` pairs, rejecting repeated
    /// distances and counts whose total would not fit in a `u64`.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut counts = BTreeMap::new();
        let mut total: u64 = 0;
        for (distance, count) in pairs {
            if counts.insert(distance, count).is_some() {
                return Err(FigureError::DuplicateDistance(distance));
            }
            total = total
                .checked_add(count)
                .ok_or(FigureError::CountOverflow(distance))?;
        }
        Ok(Self { counts })
    }

    /// The table embedded in this binary.
    pub fn embedded() -> Self {
        Self {
            counts: crate::dataset::AVALANCHE_COUNTS.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in ascending distance order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&d, &c)| (d, c))
    }

    pub fn count(&self, distance: u32) -> Option<u64> {
        self.counts.get(&distance).copied()
    }

    /// Sum of all counts; construction guarantees it fits.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Count-weighted average distance; `None` when nothing was observed.
    pub fn mean(&self) -> Option<f64> {
        weighted_mean(&self.weighted())
    }

    /// Population standard deviation of the distances.
    pub fn std_dev(&self) -> Option<f64> {
        weighted_std_dev(&self.weighted())
    }

    pub fn min_distance(&self) -> Option<u32> {
        self.counts.keys().next().copied()
    }

    pub fn max_distance(&self) -> Option<u32> {
        self.counts.keys().next_back().copied()
    }

    /// Highest single count, used to size the y axis.
    pub fn peak_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    fn weighted(&self) -> Vec<(f64, f64)> {
        self.iter().map(|(d, c)| (d as f64, c as f64)).collect()
    }

    /// Parse `hamming_distance,count` CSV.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut pairs = Vec::new();
        for record in rdr.deserialize::<FrequencyRecord>() {
            let record = record?;
            pairs.push((record.hamming_distance, record.count));
        }
        Self::from_pairs(pairs)
    }

    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::read_csv(file)?;
        log::debug!(
            "loaded {} distances from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Write the table as `hamming_distance,count` CSV, ascending by distance.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (hamming_distance, count) in self.iter() {
            wtr.serialize(FrequencyRecord {
                hamming_distance,
                count,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv(file)
    }
}
