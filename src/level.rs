//! Level catalog configuration.
//!
//! The catalog is external read-only configuration: an ordered list of
//! levels with strictly increasing ordinals starting at 1. The core never
//! mutates it; [`LevelCatalog::new`] validates it once up front so game
//! code can index it without further checks.

use crate::MIN_STEP_INTERVAL_MS;

/// A single difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Level {
    /// 1-based position in the catalog.
    pub ordinal: u16,

    /// Length of a freshly generated sequence at this level.
    pub sequence_length: usize,

    /// Requested pause between played-back signals. Values below the
    /// engine's floor are clamped up at playback time.
    pub step_interval_ms: u64,
}

impl Level {
    /// Creates a new level.
    pub const fn new(ordinal: u16, sequence_length: usize, step_interval_ms: u64) -> Self {
        Self {
            ordinal,
            sequence_length,
            step_interval_ms,
        }
    }

    /// The playback interval actually used for this level.
    pub fn effective_interval_ms(&self) -> u64 {
        self.step_interval_ms.max(MIN_STEP_INTERVAL_MS)
    }
}

/// Catalog validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// No levels provided.
    EmptyCatalog,

    /// Ordinals must start at 1 and increase by exactly 1 per entry.
    BadOrdinal { index: usize, ordinal: u16 },

    /// A level has a zero sequence length.
    ZeroSequenceLength { ordinal: u16 },

    /// A level has a zero step interval.
    ZeroStepInterval { ordinal: u16 },
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CatalogError::EmptyCatalog => {
                write!(f, "level catalog must have at least one entry")
            }
            CatalogError::BadOrdinal { index, ordinal } => {
                write!(
                    f,
                    "level at index {} has ordinal {}, expected {}",
                    index,
                    ordinal,
                    index + 1
                )
            }
            CatalogError::ZeroSequenceLength { ordinal } => {
                write!(f, "level {} has zero sequence length", ordinal)
            }
            CatalogError::ZeroStepInterval { ordinal } => {
                write!(f, "level {} has zero step interval", ordinal)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogError {}

/// A validated, read-only catalog of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCatalog<'a> {
    levels: &'a [Level],
}

impl<'a> LevelCatalog<'a> {
    /// Validates and wraps a level list.
    ///
    /// # Errors
    /// * `EmptyCatalog` - the list is empty
    /// * `BadOrdinal` - ordinals are not 1, 2, 3, ...
    /// * `ZeroSequenceLength` / `ZeroStepInterval` - degenerate level
    pub fn new(levels: &'a [Level]) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        for (index, level) in levels.iter().enumerate() {
            if usize::from(level.ordinal) != index + 1 {
                return Err(CatalogError::BadOrdinal {
                    index,
                    ordinal: level.ordinal,
                });
            }
            if level.sequence_length == 0 {
                return Err(CatalogError::ZeroSequenceLength {
                    ordinal: level.ordinal,
                });
            }
            if level.step_interval_ms == 0 {
                return Err(CatalogError::ZeroStepInterval {
                    ordinal: level.ordinal,
                });
            }
        }

        Ok(Self { levels })
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; validated catalogs are non-empty.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the level at the given index, if in range.
    ///
    /// The reference borrows from the underlying catalog slice, not from
    /// this wrapper.
    pub fn get(&self, index: usize) -> Option<&'a Level> {
        self.levels.get(index)
    }

    /// Returns true if `index` is the final level.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.levels.len()
    }

    /// Sequence length a run starting at `index` will have reached by the
    /// final level: the starting length plus one appended signal per
    /// remaining level.
    pub fn final_sequence_length(&self, index: usize) -> Option<usize> {
        let level = self.levels.get(index)?;
        Some(level.sequence_length + (self.levels.len() - 1 - index))
    }
}
