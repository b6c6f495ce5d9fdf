use core::{
    alloc::Layout,
    fmt,
    iter::FusedIterator,
    ptr::{self, NonNull},
};

use alloc::alloc::dealloc;

/// Owning iterator returned by `Vector::into_iter`.
///
/// Yields the live elements front to back. Elements not consumed are dropped,
/// and the buffer is released, when the iterator is dropped.
pub struct IntoIter<T> {
    pub(super) ptr: NonNull<T>,
    pub(super) layout: Layout,
    pub(super) start: usize,
    pub(super) end: usize,
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    fn remaining(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr().add(self.start), self.len()) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        unsafe {
            let item = ptr::read(self.ptr.as_ptr().add(self.start));
            self.start += 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        self.end -= 1;
        unsafe { Some(ptr::read(self.ptr.as_ptr().add(self.end))) }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.remaining()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(
                self.ptr.as_ptr().add(self.start),
                self.end - self.start,
            );
            self.start = self.end;
            ptr::drop_in_place(rest);
            dealloc(self.ptr.as_ptr().cast(), self.layout);
        }
        log::trace!("released {} byte buffer after owned iteration", self.layout.size());
    }
}
