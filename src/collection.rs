use crate::blinker::{BlinkSink, IntervalBlinker};
use crate::command::BlinkerAction;
use crate::types::BlinkerError;

/// An identifier for a blinker within a collection.
///
/// This is a simple wrapper around `usize` that provides type safety for
/// blinker identifiers. Users specify IDs when adding blinkers to a
/// collection, and use these IDs to target specific blinkers with commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkerId(pub usize);

impl From<usize> for BlinkerId {
    fn from(id: usize) -> Self {
        BlinkerId(id)
    }
}

impl From<BlinkerId> for usize {
    fn from(id: BlinkerId) -> Self {
        id.0
    }
}

/// Errors that can occur during collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The specified blinker ID does not exist in the collection.
    InvalidBlinkerId(BlinkerId),

    /// Attempted to add a blinker with an ID that already exists.
    DuplicateBlinkerId(BlinkerId),

    /// The blinker ID exceeds the collection's capacity.
    BlinkerIdOutOfBounds {
        /// The offending identifier.
        id: BlinkerId,
        /// The collection's fixed capacity.
        capacity: usize,
    },

    /// A blinker operation failed.
    BlinkerError(BlinkerError),
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::InvalidBlinkerId(id) => {
                write!(f, "blinker ID {} does not exist in collection", id.0)
            }
            CollectionError::DuplicateBlinkerId(id) => {
                write!(f, "blinker ID {} already exists in collection", id.0)
            }
            CollectionError::BlinkerIdOutOfBounds { id, capacity } => {
                write!(
                    f,
                    "blinker ID {} exceeds collection capacity of {}",
                    id.0, capacity
                )
            }
            CollectionError::BlinkerError(err) => {
                write!(f, "blinker error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

impl From<BlinkerError> for CollectionError {
    fn from(err: BlinkerError) -> Self {
        CollectionError::BlinkerError(err)
    }
}

/// Manages a collection of blinkers for coordinated multi-device signalling.
///
/// This is a convenience wrapper that handles routing commands to individual
/// blinkers and provides batch ticking from a single driving loop. Each
/// blinker in the collection is identified by a user-specified [`BlinkerId`].
///
/// Blinkers share no state with each other, so the tick order is irrelevant;
/// storage is a fixed-size array and nothing is heap-allocated.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed interval tables
/// * `S` - Output device implementation type (same for all blinkers)
/// * `MAX` - Maximum number of blinkers this collection can hold
pub struct BlinkerCollection<'a, S: BlinkSink, const MAX: usize> {
    blinkers: [Option<IntervalBlinker<'a, S>>; MAX],
}

impl<'a, S: BlinkSink, const MAX: usize> BlinkerCollection<'a, S, MAX> {
    /// Creates a new empty blinker collection.
    pub fn new() -> Self {
        Self {
            blinkers: core::array::from_fn(|_| None),
        }
    }

    /// Adds a blinker to the collection with the specified ID.
    ///
    /// The sink is moved into a new idle blinker carrying the default
    /// pattern, stored in the collection under the provided ID.
    ///
    /// # Errors
    /// * `DuplicateBlinkerId` - A blinker with this ID already exists
    /// * `BlinkerIdOutOfBounds` - The ID exceeds the collection's capacity
    pub fn add_blinker(&mut self, id: BlinkerId, sink: S) -> Result<(), CollectionError> {
        let idx = id.0;

        if idx >= MAX {
            return Err(CollectionError::BlinkerIdOutOfBounds { id, capacity: MAX });
        }

        if self.blinkers[idx].is_some() {
            return Err(CollectionError::DuplicateBlinkerId(id));
        }

        self.blinkers[idx] = Some(IntervalBlinker::new(sink));
        Ok(())
    }

    /// Routes an action to the specified blinker.
    ///
    /// # Errors
    /// * `InvalidBlinkerId` - No blinker exists under this ID
    /// * `BlinkerError` - The underlying blinker operation failed
    pub fn handle_command(
        &mut self,
        id: BlinkerId,
        action: BlinkerAction<'a>,
    ) -> Result<(), CollectionError> {
        let blinker = self.blinker_mut(id)?;
        Ok(blinker.handle_action(action)?)
    }

    /// Advances every blinker in the collection by the given elapsed time.
    ///
    /// # Returns
    /// `true` while at least one blinker is still running after processing.
    pub fn tick_all(&mut self, elapsed_millis: u32) -> bool {
        let mut any_running = false;

        for blinker in self.blinkers.iter_mut().flatten() {
            if blinker.tick_update(elapsed_millis) {
                any_running = true;
            }
        }

        any_running
    }

    /// Returns whether the specified blinker is currently running.
    ///
    /// # Errors
    /// Returns `InvalidBlinkerId` if the blinker does not exist.
    pub fn is_running(&self, id: BlinkerId) -> Result<bool, CollectionError> {
        Ok(self.blinker(id)?.is_running())
    }

    /// Returns the current phase of the specified blinker (`None` when idle).
    ///
    /// # Errors
    /// Returns `InvalidBlinkerId` if the blinker does not exist.
    pub fn current_phase(&self, id: BlinkerId) -> Result<Option<bool>, CollectionError> {
        Ok(self.blinker(id)?.current_phase())
    }

    /// Returns the number of blinkers currently in the collection.
    pub fn len(&self) -> usize {
        self.blinkers.iter().filter(|b| b.is_some()).count()
    }

    /// Returns true if the collection holds no blinkers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn blinker(&self, id: BlinkerId) -> Result<&IntervalBlinker<'a, S>, CollectionError> {
        self.blinkers
            .get(id.0)
            .and_then(|b| b.as_ref())
            .ok_or(CollectionError::InvalidBlinkerId(id))
    }

    fn blinker_mut(
        &mut self,
        id: BlinkerId,
    ) -> Result<&mut IntervalBlinker<'a, S>, CollectionError> {
        self.blinkers
            .get_mut(id.0)
            .and_then(|b| b.as_mut())
            .ok_or(CollectionError::InvalidBlinkerId(id))
    }
}

impl<'a, S: BlinkSink, const MAX: usize> Default for BlinkerCollection<'a, S, MAX> {
    fn default() -> Self {
        Self::new()
    }
}
