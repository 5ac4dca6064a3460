//! Subset-sum instances: an ordered multiset of positive integers and a target.
//!
//! Instances are validated once, on construction, and are immutable
//! afterwards. Every solver receives them by reference.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single subset-sum query `(S, T)`.
///
/// The set keeps the caller's order and may contain duplicates. Every element
/// is strictly positive and the total of all elements fits in a `u64`, so
/// solvers may add any sub-collection without overflow.
///
/// # Examples
///
/// ```
/// use subset_sum_core::Instance;
///
/// # fn main() -> Result<(), subset_sum_core::InstanceError> {
/// let instance = Instance::new(vec![3, 34, 4, 12, 5, 2], 9)?;
/// assert_eq!(instance.len(), 6);
/// assert_eq!(instance.total(), 60);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawInstance")
)]
pub struct Instance {
    set: Vec<u64>,
    target: u64,
}

/// Errors returned when validating an [`Instance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// An element of the set was zero or negative.
    #[error("element {value} at index {index} is not strictly positive")]
    NonPositiveElement {
        /// Position of the offending element in the input.
        index: usize,
        /// The rejected value.
        value: i64,
    },
    /// The target was negative.
    #[error("target {target} is negative")]
    NegativeTarget {
        /// The rejected target.
        target: i64,
    },
    /// The elements add up to more than `u64::MAX`.
    #[error("the elements of the set sum to more than {}", u64::MAX)]
    SumOverflow,
}

impl Instance {
    /// Validates and constructs an [`Instance`].
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NonPositiveElement`] for a zero element and
    /// [`InstanceError::SumOverflow`] when the total does not fit in `u64`.
    pub fn new(set: Vec<u64>, target: u64) -> Result<Self, InstanceError> {
        if let Some(index) = set.iter().position(|&value| value == 0) {
            return Err(InstanceError::NonPositiveElement { index, value: 0 });
        }
        set.iter()
            .try_fold(0_u64, |total, &value| total.checked_add(value))
            .ok_or(InstanceError::SumOverflow)?;
        Ok(Self { set, target })
    }

    /// Validates signed input, as read from user-facing formats.
    ///
    /// # Errors
    ///
    /// Rejects non-positive elements and a negative target in addition to
    /// the checks made by [`Instance::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use subset_sum_core::{Instance, InstanceError};
    ///
    /// let err = Instance::from_signed(&[3, -1], 2).unwrap_err();
    /// assert_eq!(err, InstanceError::NonPositiveElement { index: 1, value: -1 });
    ///
    /// let err = Instance::from_signed(&[3], -4).unwrap_err();
    /// assert_eq!(err, InstanceError::NegativeTarget { target: -4 });
    /// ```
    pub fn from_signed(set: &[i64], target: i64) -> Result<Self, InstanceError> {
        let elements = set
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u64::try_from(value)
                    .ok()
                    .filter(|&element| element > 0)
                    .ok_or(InstanceError::NonPositiveElement { index, value })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let target =
            u64::try_from(target).map_err(|_| InstanceError::NegativeTarget { target })?;
        Self::new(elements, target)
    }

    /// The elements of the set, in input order.
    pub fn set(&self) -> &[u64] {
        &self.set
    }

    /// The target sum.
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Sum of every element. Never overflows for a validated instance.
    pub fn total(&self) -> u64 {
        self.set.iter().sum()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawInstance {
    set: Vec<i64>,
    target: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawInstance> for Instance {
    type Error = InstanceError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        Self::from_signed(&raw.set, raw.target)
    }
}
