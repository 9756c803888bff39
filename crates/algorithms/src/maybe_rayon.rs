//! Switch between rayon and plain iterators.
//!
//! With the `parallel` feature (the default) this is `rayon::prelude`.
//! Without it, `into_par_iter()` hands back an ordinary iterator, so the
//! rest of each chain (`map`, `flat_map`, `filter`, `collect`) resolves to
//! `std::iter::Iterator` and runs on one thread.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Stand-in for `rayon::iter::IntoParallelIterator`
    pub trait IntoParallelIterator {
        type Iter: Iterator<Item = Self::Item>;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
