use super::{FiniteSpace, Space};
use rand::distributions::Distribution;
use rand::Rng;
use std::any;
use std::fmt;
use std::marker::PhantomData;

/// An indexed set of finitely many possibilities.
pub trait Indexed {
    /// The number of possible values this type can represent.
    const SIZE: usize;

    /// Convert into an index.
    fn as_index(&self) -> usize;

    /// Create from an index.
    fn from_index(index: usize) -> Option<Self>
    where
        Self: Sized;
}

/// A space defined over an indexed type.
pub struct IndexedTypeSpace<T> {
    element_type: PhantomData<fn() -> T>,
}

impl<T> IndexedTypeSpace<T> {
    pub const fn new() -> Self {
        Self {
            element_type: PhantomData,
        }
    }
}

impl<T> Default for IndexedTypeSpace<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IndexedTypeSpace<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for IndexedTypeSpace<T> {}

impl<T> fmt::Debug for IndexedTypeSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedTypeSpace<{}>", any::type_name::<T>())
    }
}

impl<T> fmt::Display for IndexedTypeSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexedTypeSpace<{}>", any::type_name::<T>())
    }
}

impl<T: Indexed> Space for IndexedTypeSpace<T> {
    type Element = T;

    fn contains(&self, _element: &Self::Element) -> bool {
        true
    }
}

impl<T: Indexed> Distribution<T> for IndexedTypeSpace<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        T::from_index(rng.gen_range(0..T::SIZE)).unwrap()
    }
}

impl<T: Indexed> FiniteSpace for IndexedTypeSpace<T> {
    fn len(&self) -> usize {
        T::SIZE
    }

    fn to_index(&self, element: &Self::Element) -> usize {
        element.as_index()
    }

    fn from_index(&self, index: usize) -> Option<Self::Element> {
        T::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tricolor {
        Red,
        Green,
        Blue,
    }

    impl Indexed for Tricolor {
        const SIZE: usize = 3;

        fn as_index(&self) -> usize {
            match self {
                Self::Red => 0,
                Self::Green => 1,
                Self::Blue => 2,
            }
        }

        fn from_index(index: usize) -> Option<Self> {
            match index {
                0 => Some(Self::Red),
                1 => Some(Self::Green),
                2 => Some(Self::Blue),
                _ => None,
            }
        }
    }

    #[test]
    fn index_round_trip() {
        let space = IndexedTypeSpace::<Tricolor>::new();
        assert_eq!(space.len(), 3);
        for index in 0..space.len() {
            let element = space.from_index(index).unwrap();
            assert_eq!(space.to_index(&element), index);
        }
        assert_eq!(<Tricolor as Indexed>::from_index(3), None);
    }

    #[test]
    fn samples_are_contained() {
        let space = IndexedTypeSpace::<Tricolor>::new();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let element = space.sample(&mut rng);
            assert!(space.contains(&element));
        }
    }
}
