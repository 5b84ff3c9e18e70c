//! Tuning policy threaded unchanged through every level of one sort.

use thiserror::Error;

/// Errors returned by [`SortSettingsBuilder::build`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// A loop unroll factor was outside the supported range.
    #[error("loop unroll factor must be between 1 and 8, got {0}")]
    UnrollFactor(usize),

    /// An insertion sort ceiling of zero would leave single elements unhandled.
    #[error("insertion sort upper limit must be at least 1")]
    InsertionSortLimit,

    /// Sequence keys need at least one level before falling back to comparisons.
    #[error("sequence recursion limit must be at least 1")]
    RecursionLimit,
}

/// Width of the per-bucket counters used by a histogram pass.
///
/// Narrower counters keep the histogram in fewer cache lines. A width too small for the
/// range being partitioned is widened automatically, so this is a preference, never a limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CountWidth {
    U8,
    U16,
    U32,
    #[default]
    U64,
}

impl CountWidth {
    /// The narrowest width able to count `len` elements.
    pub fn required_for(len: usize) -> Self {
        if len <= u8::MAX as usize {
            CountWidth::U8
        } else if len <= u16::MAX as usize {
            CountWidth::U16
        } else if len as u64 <= u32::MAX as u64 {
            CountWidth::U32
        } else {
            CountWidth::U64
        }
    }
}

/// Insertion sort ceilings per element size class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InsertionSortLimits {
    /// Elements smaller than 16 bytes.
    pub small: usize,
    /// Elements smaller than 24 bytes.
    pub medium: usize,
    /// Everything else.
    pub large: usize,
}

impl Default for InsertionSortLimits {
    fn default() -> Self {
        Self {
            small: 32,
            medium: 24,
            large: 16,
        }
    }
}

/// Policy controlling when to insertion sort, which partitioning strategy to use and
/// how far to unroll the hot loops.
///
/// Construct with [`SortSettings::default`], one of the presets, or
/// [`SortSettings::builder`].
///
/// # Examples
///
/// ```
/// use skasort::{radix_sort_with_settings, SortSettings};
///
/// let settings = SortSettings::builder()
///     .with_american_flag_sort_upper_limit(4096)
///     .with_first_loop_unroll(8)
///     .build()
///     .unwrap();
///
/// let mut data = vec![3u32, 1, 2];
/// radix_sort_with_settings(&mut data, &settings);
/// assert_eq!(data, vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSettings {
    insertion_sort_limits: InsertionSortLimits,
    american_flag_sort_upper_limit: usize,
    first_loop_unroll: usize,
    second_loop_unroll: usize,
    count_width: CountWidth,
    sequence_recursion_limit: usize,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            insertion_sort_limits: InsertionSortLimits::default(),
            american_flag_sort_upper_limit: 2048,
            first_loop_unroll: 4,
            second_loop_unroll: 4,
            count_width: CountWidth::default(),
            sequence_recursion_limit: 16,
        }
    }
}

impl SortSettings {
    pub fn builder() -> SortSettingsBuilder {
        SortSettingsBuilder::default()
    }

    /// Every partition of two or more elements goes through American-flag partitioning.
    pub fn american_flag_only() -> Self {
        Self {
            insertion_sort_limits: InsertionSortLimits {
                small: 1,
                medium: 1,
                large: 1,
            },
            american_flag_sort_upper_limit: usize::MAX,
            ..Self::default()
        }
    }

    /// Every partition of two or more elements goes through ska byte partitioning.
    pub fn ska_byte_only() -> Self {
        Self {
            insertion_sort_limits: InsertionSortLimits {
                small: 1,
                medium: 1,
                large: 1,
            },
            american_flag_sort_upper_limit: 1,
            ..Self::default()
        }
    }

    /// Partitions with fewer elements than this are insertion sorted.
    pub fn insertion_sort_upper_limit(&self, element_size: usize) -> usize {
        let limits = &self.insertion_sort_limits;
        if element_size < 16 {
            limits.small
        } else if element_size < 24 {
            limits.medium
        } else {
            limits.large
        }
    }

    pub fn insertion_sort_limits(&self) -> InsertionSortLimits {
        self.insertion_sort_limits
    }

    /// Partitions with fewer elements than this use American-flag partitioning,
    /// larger ones use ska byte partitioning.
    pub fn american_flag_sort_upper_limit(&self) -> usize {
        self.american_flag_sort_upper_limit
    }

    /// Unroll factor of the histogram counting loop.
    pub fn first_loop_unroll(&self) -> usize {
        self.first_loop_unroll
    }

    /// Unroll factor of the ska settling loop.
    pub fn second_loop_unroll(&self) -> usize {
        self.second_loop_unroll
    }

    pub fn count_width(&self) -> CountWidth {
        self.count_width
    }

    /// Number of element positions a sequence key is radix sorted on before the
    /// remainder is handed to a comparison sort.
    pub fn sequence_recursion_limit(&self) -> usize {
        self.sequence_recursion_limit
    }
}

/// Builder for [`SortSettings`], validating values on [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct SortSettingsBuilder {
    settings: SortSettings,
}

impl SortSettingsBuilder {
    /// Starts from an existing policy, e.g. one of the presets.
    pub fn from_settings(settings: SortSettings) -> Self {
        Self { settings }
    }

    /// Uses the same insertion sort ceiling for every element size class.
    pub fn with_insertion_sort_upper_limit(mut self, limit: usize) -> Self {
        self.settings.insertion_sort_limits = InsertionSortLimits {
            small: limit,
            medium: limit,
            large: limit,
        };

        self
    }

    pub fn with_insertion_sort_limits(mut self, limits: InsertionSortLimits) -> Self {
        self.settings.insertion_sort_limits = limits;

        self
    }

    pub fn with_american_flag_sort_upper_limit(mut self, limit: usize) -> Self {
        self.settings.american_flag_sort_upper_limit = limit;

        self
    }

    pub fn with_first_loop_unroll(mut self, factor: usize) -> Self {
        self.settings.first_loop_unroll = factor;

        self
    }

    pub fn with_second_loop_unroll(mut self, factor: usize) -> Self {
        self.settings.second_loop_unroll = factor;

        self
    }

    pub fn with_count_width(mut self, width: CountWidth) -> Self {
        self.settings.count_width = width;

        self
    }

    pub fn with_sequence_recursion_limit(mut self, limit: usize) -> Self {
        self.settings.sequence_recursion_limit = limit;

        self
    }

    pub fn build(self) -> Result<SortSettings, SettingsError> {
        let settings = self.settings;
        for factor in [settings.first_loop_unroll, settings.second_loop_unroll] {
            if !(1..=8).contains(&factor) {
                return Err(SettingsError::UnrollFactor(factor));
            }
        }
        let limits = settings.insertion_sort_limits;
        if limits.small == 0 || limits.medium == 0 || limits.large == 0 {
            return Err(SettingsError::InsertionSortLimit);
        }
        if settings.sequence_recursion_limit == 0 {
            return Err(SettingsError::RecursionLimit);
        }
        Ok(settings)
    }
}
