//! Tracked values - current state plus the last value confirmed remote.

/// A value with sync bookkeeping.
///
/// A field is *dirty* when its current value has never been confirmed
/// written to the remote store, or differs from the last confirmed value
/// by content. Re-assigning the already-synced value leaves the field
/// clean, so uploads stay minimal.
///
/// [`mark_synced`](Self::mark_synced) must only be called after the
/// transport layer confirms a successful write; a failed or cancelled
/// upload leaves the field dirty and safely retryable.
#[derive(Clone, Debug)]
pub struct TrackedField<T> {
    name: &'static str,
    value: T,
    synced: Option<T>,
}

impl<T: Clone + PartialEq> TrackedField<T> {
    /// Create a field that has never been synced.
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            value,
            synced: None,
        }
    }

    /// Field name, used as the array key in file sets.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Overwrite the current value. Dirtiness is derived, not stored:
    /// setting the synced value back leaves the field clean.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    /// True when the current value is not confirmed remote.
    pub fn is_dirty(&self) -> bool {
        match &self.synced {
            None => true,
            Some(synced) => *synced != self.value,
        }
    }

    /// Record the current value as confirmed remote.
    pub fn mark_synced(&mut self) {
        self.synced = Some(self.value.clone());
    }

    /// Last value confirmed remote, if any sync has happened.
    pub fn last_synced(&self) -> Option<&T> {
        self.synced.as_ref()
    }
}

impl<T: Clone + PartialEq> TrackedField<Option<T>> {
    /// True when no value has ever been set on an optional field.
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}
