//! Action and observation spaces
mod indexed_type;

pub use indexed_type::{Indexed, IndexedTypeSpace};

use rand::distributions::Distribution;
use std::fmt::Debug;

/// A mathematical set of possible values.
pub trait Space: Debug {
    type Element;

    /// Check whether the space contains a particular value.
    fn contains(&self, element: &Self::Element) -> bool;
}

/// A space containing finitely many elements, indexable by `0 .. len`.
pub trait FiniteSpace: Space {
    /// The number of elements in the space.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index of an element.
    fn to_index(&self, element: &Self::Element) -> usize;

    /// The element at an index, if the index is in range.
    fn from_index(&self, index: usize) -> Option<Self::Element>;
}

/// A space from which elements can be sampled uniformly at random.
pub trait SampleSpace: Space + Distribution<<Self as Space>::Element> {}

impl<S> SampleSpace for S where S: Space + Distribution<<S as Space>::Element> {}
