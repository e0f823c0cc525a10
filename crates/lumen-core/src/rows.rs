//! Row traversal shared by every full-image loop.
//!
//! With the `parallel` feature rows are distributed over the rayon pool;
//! without it the same closure runs sequentially. Each row only writes its
//! own slice of the output, so results are identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Call `f(y, row)` for each `row_len`-sized row of `buf`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    debug_assert!(row_len > 0, "row length must be positive");
    buf.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Call `f(y, row)` for each `row_len`-sized row of `buf`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(buf: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    debug_assert!(row_len > 0, "row length must be positive");
    buf.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
