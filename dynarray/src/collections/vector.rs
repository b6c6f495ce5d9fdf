use alloc::alloc::{alloc, dealloc, handle_alloc_error, realloc};

use core::{
    alloc::Layout,
    fmt::{self, Display, Write},
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Index, IndexMut},
    ptr::{self, NonNull},
    slice,
};

use crate::errors::{Result, VectorError};

pub use iter::IntoIter;
pub use position::{Access, Cursor, Mutable, Position, PositionMut, ReadOnly};

mod iter;
mod position;

/// Growth floor used when a vector type does not name one.
pub const DEFAULT_FLOOR: usize = 5;

/// A contiguous, growable array that owns its elements.
///
/// The capacity never drops below `FLOOR` slots, so the backing buffer is
/// allocated for the whole life of the vector and released exactly once, on
/// drop. Appending past the capacity doubles it.
///
/// Positions ([`Position`], [`PositionMut`]) are plain values that do not
/// borrow the vector. Every structural mutation bumps an internal generation,
/// and positions issued before it are rejected with
/// [`VectorError::StalePosition`].
pub struct Vector<T, const FLOOR: usize = DEFAULT_FLOOR> {
    ptr: NonNull<T>,
    capacity: usize,
    length: usize,
    generation: u64,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, const FLOOR: usize> Send for Vector<T, FLOOR> {}
unsafe impl<T: Sync, const FLOOR: usize> Sync for Vector<T, FLOOR> {}

impl<T, const FLOOR: usize> Default for Vector<T, FLOOR> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const FLOOR: usize> Vector<T, FLOOR> {
    const LAYOUT_CHECKS: () = {
        assert!(FLOOR > 0, "the growth floor must be at least one slot");
        assert!(
            mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
    };

    /// Minimum capacity this vector type keeps.
    pub const MIN_CAPACITY: usize = FLOOR;

    /// Creates an empty vector with `FLOOR` slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(FLOOR)
    }

    /// Creates an empty vector with room for `capacity` elements, raised to
    /// `FLOOR` when smaller.
    ///
    /// # Panics
    ///
    /// Panics if the byte size of the buffer overflows `isize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::Vector;
    ///
    /// let small: Vector<u8> = Vector::with_capacity(2);
    /// assert_eq!(small.capacity(), 5);
    ///
    /// let large: Vector<u8> = Vector::with_capacity(64);
    /// assert_eq!(large.capacity(), 64);
    /// assert!(large.is_empty());
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let () = Self::LAYOUT_CHECKS;
        let capacity = capacity.max(FLOOR);

        Self {
            ptr: Self::allocate(capacity),
            capacity,
            length: 0,
            generation: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a vector holding `count` clones of `value`.
    #[must_use]
    pub fn repeating(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(count);
        for _ in 0..count {
            vector.push_back(value.clone());
        }
        vector
    }

    /// Creates a vector holding clones of `values`, in order.
    #[must_use]
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(values.len());
        for value in values {
            vector.push_back(value.clone());
        }
        vector
    }

    /// The number of live elements.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.length
    }

    /// The number of elements the vector can hold without reallocating.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Drops every live element. The buffer and its capacity are kept.
    pub fn clear(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.length);
        log::debug!("clearing {} elements (capacity {})", self.length, self.capacity);
        self.length = 0;
        self.invalidate();
        unsafe { ptr::drop_in_place(live) };
    }

    /// Grows the buffer to exactly `new_capacity` slots. Does nothing when the
    /// current capacity is already large enough.
    ///
    /// # Panics
    ///
    /// Panics if the byte size of the new buffer overflows `isize`.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }
        self.realloc(new_capacity);
    }

    /// Shrinks the buffer to the live element count, but never below `FLOOR`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ShrinkEmpty`] when the vector holds no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::Vector;
    ///
    /// let mut v: Vector<i32> = Vector::with_capacity(32);
    /// assert!(v.shrink_to_fit().is_err());
    ///
    /// v.extend(0..8);
    /// v.shrink_to_fit().unwrap();
    /// assert_eq!(v.capacity(), 8);
    /// ```
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.length == 0 {
            return Err(VectorError::ShrinkEmpty);
        }

        let target = self.length.max(FLOOR);
        if target >= self.capacity {
            return Ok(());
        }

        log::debug!("shrinking capacity {} to {}", self.capacity, target);
        self.realloc(target);
        Ok(())
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`VectorError::Empty`] when the vector is empty, otherwise
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index, "get")?;
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    /// Mutable counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index, "get_mut")?;
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
    }

    /// Returns a reference to the first element, if available.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a reference to the last element, if available.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Appends `value`, doubling the capacity first when the buffer is full.
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::Vector;
    ///
    /// let mut v: Vector<i32> = Vector::new();
    /// for i in 0..5 {
    ///     v.push_back(i);
    /// }
    /// assert_eq!(v.capacity(), 5);
    ///
    /// v.push_back(5);
    /// assert_eq!(v.capacity(), 10);
    /// assert_eq!(v.size(), 6);
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.length >= self.capacity {
            self.grow();
        }

        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.length), value);
        }

        self.length += 1;
    }

    /// Removes the last element and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Empty`] when there is nothing to remove.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.length == 0 {
            return Err(VectorError::Empty {
                operation: "pop_back",
            });
        }

        self.length -= 1;
        Ok(unsafe { ptr::read(self.ptr.as_ptr().add(self.length)) })
    }

    /// Position of the first element.
    #[must_use]
    pub const fn begin(&self) -> Position<T> {
        Cursor::new(self.ptr, 0, self.generation)
    }

    /// Position one past the last element.
    #[must_use]
    pub const fn end(&self) -> Position<T> {
        Cursor::new(self.ptr, self.length, self.generation)
    }

    #[must_use]
    pub const fn begin_mut(&mut self) -> PositionMut<T> {
        Cursor::new(self.ptr, 0, self.generation)
    }

    #[must_use]
    pub const fn end_mut(&mut self) -> PositionMut<T> {
        Cursor::new(self.ptr, self.length, self.generation)
    }

    /// Dereferences a position issued by this vector.
    ///
    /// # Errors
    ///
    /// [`VectorError::StalePosition`] or [`VectorError::ForeignPosition`] when
    /// the position is not valid for the current storage, and
    /// [`VectorError::PositionOutOfRange`] when it does not name a live
    /// element (for example [`end`](Self::end)).
    pub fn at<P>(&self, position: P) -> Result<&T>
    where
        P: Into<Position<T>>,
    {
        let offset = self.checked_offset(&position.into(), self.length)?;
        Ok(unsafe { &*self.ptr.as_ptr().add(offset) })
    }

    /// Mutable counterpart of [`at`](Self::at). Only mutable positions are accepted.
    ///
    /// # Errors
    ///
    /// Same as [`at`](Self::at).
    pub fn at_mut(&mut self, position: PositionMut<T>) -> Result<&mut T> {
        let offset = self.checked_offset(&position.into(), self.length)?;
        Ok(unsafe { &mut *self.ptr.as_ptr().add(offset) })
    }

    /// Inserts `value` before `position`, shifting later elements toward the
    /// tail, and returns a position at the inserted element.
    ///
    /// All previously issued positions are invalidated.
    ///
    /// # Errors
    ///
    /// Fails without touching the vector when the position is stale, was
    /// issued by another vector, or lies outside `[begin(), end()]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::{vector, Vector};
    ///
    /// let mut v = vector![1, 2, 4];
    /// let inserted = v.insert(v.begin() + 2, 3).unwrap();
    /// assert_eq!(*v.at(inserted).unwrap(), 3);
    /// assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn insert<P>(&mut self, position: P, value: T) -> Result<PositionMut<T>>
    where
        P: Into<Position<T>>,
    {
        let offset = self.checked_offset(&position.into(), self.length + 1)?;

        if self.length >= self.capacity {
            self.grow();
        }

        self.shift_right(offset);
        unsafe { ptr::write(self.ptr.as_ptr().add(offset), value) };
        self.length += 1;
        self.invalidate();

        Ok(Cursor::new(self.ptr, offset, self.generation))
    }

    /// Removes the element at `position`, shifting later elements toward the
    /// head, and returns a position at the element that took its slot
    /// ([`end`](Self::end) if the last element was erased).
    ///
    /// All previously issued positions are invalidated.
    ///
    /// # Errors
    ///
    /// Fails without touching the vector when the position is stale, was
    /// issued by another vector, or does not name a live element.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::vector;
    ///
    /// let mut v = vector![10, 20, 30];
    /// let next = v.erase(v.begin()).unwrap();
    /// assert_eq!(*v.at(next).unwrap(), 20);
    ///
    /// let last = v.erase(v.begin() + 1).unwrap();
    /// assert_eq!(last, v.end());
    /// ```
    pub fn erase<P>(&mut self, position: P) -> Result<PositionMut<T>>
    where
        P: Into<Position<T>>,
    {
        let offset = self.checked_offset(&position.into(), self.length)?;

        let removed = unsafe { ptr::read(self.ptr.as_ptr().add(offset)) };
        self.shift_left(offset + 1);
        self.length -= 1;
        self.invalidate();
        drop(removed);

        Ok(Cursor::new(self.ptr, offset, self.generation))
    }

    /// Exchanges storage with `other`. Positions issued by either vector are
    /// invalidated.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
        mem::swap(&mut self.length, &mut other.length);

        let generation = self.generation.max(other.generation).wrapping_add(1);
        self.generation = generation;
        other.generation = generation;
    }

    /// Replaces the contents of `self` with `source`, releasing what `self`
    /// held before.
    ///
    /// Pass `other.clone()` for copy assignment; the copy is complete before
    /// `self` changes, and the previous buffer is freed when the swapped-out
    /// temporary drops.
    pub fn assign(&mut self, mut source: Self) {
        self.swap(&mut source);
    }

    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.length) }
    }

    #[must_use]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.length) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Writes the elements as `[a, b, c]` to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates any error reported by `sink`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::{vector, Vector};
    ///
    /// let mut out = String::new();
    /// vector![1, 2, 3].print(&mut out).unwrap();
    /// assert_eq!(out, "[1, 2, 3]");
    ///
    /// out.clear();
    /// let empty: Vector<i32> = Vector::new();
    /// empty.print(&mut out).unwrap();
    /// assert_eq!(out, "[]");
    /// ```
    pub fn print<W>(&self, sink: &mut W) -> fmt::Result
    where
        W: Write + ?Sized,
        T: Display,
    {
        sink.write_char('[')?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                sink.write_str(", ")?;
            }
            write!(sink, "{value}")?;
        }
        sink.write_char(']')
    }

    /// Renders the same text as [`print`](Self::print) into an I/O sink.
    ///
    /// # Errors
    ///
    /// Propagates any error reported by `sink`.
    #[cfg(feature = "std")]
    pub fn write_to<W>(&self, sink: &mut W) -> std::io::Result<()>
    where
        W: std::io::Write + ?Sized,
        T: Display,
    {
        write!(sink, "{self}")
    }

    fn check_index(&self, index: usize, operation: &'static str) -> Result<()> {
        if self.length == 0 {
            Err(VectorError::Empty { operation })
        } else if index >= self.length {
            Err(VectorError::IndexOutOfRange {
                index,
                size: self.length,
            })
        } else {
            Ok(())
        }
    }

    /// Translates `position` into an offset in `[0, limit)`.
    fn checked_offset(&self, position: &Position<T>, limit: usize) -> Result<usize> {
        if position.generation() != self.generation {
            log::warn!(
                "rejected stale position (generation {} != {})",
                position.generation(),
                self.generation
            );
            return Err(VectorError::StalePosition {
                issued: position.generation(),
                current: self.generation,
            });
        }
        if position.base() != self.ptr {
            log::warn!("rejected position issued by another vector");
            return Err(VectorError::ForeignPosition);
        }

        let distance = *position - self.begin();
        match usize::try_from(distance) {
            Ok(offset) if offset < limit => Ok(offset),
            _ => Err(VectorError::PositionOutOfRange {
                offset: distance,
                limit,
            }),
        }
    }

    const fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn grow(&mut self) {
        let doubled = self
            .length
            .checked_mul(2)
            .unwrap_or_else(|| capacity_overflow());
        self.reserve(doubled);
    }

    fn layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_overflow())
    }

    fn allocate(capacity: usize) -> NonNull<T> {
        let layout = Self::layout(capacity);
        let raw = unsafe { alloc(layout).cast::<T>() };
        NonNull::new(raw).unwrap_or_else(|| handle_alloc_error(layout))
    }

    /// Moves the live elements into a buffer of exactly `new_capacity` slots
    /// and releases the old one.
    fn realloc(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.length && new_capacity >= FLOOR);

        let old_layout = Self::layout(self.capacity);
        let new_layout = Self::layout(new_capacity);
        log::trace!(
            "reallocating storage: {} -> {} slots ({} live)",
            self.capacity,
            new_capacity,
            self.length
        );

        let raw = unsafe { realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) };
        self.ptr = NonNull::new(raw.cast::<T>()).unwrap_or_else(|| handle_alloc_error(new_layout));
        self.capacity = new_capacity;
        self.invalidate();
    }

    /// Moves `[from, length)` one slot toward the tail, last element first.
    fn shift_right(&mut self, from: usize) {
        debug_assert!(self.length < self.capacity);
        for i in (from..self.length).rev() {
            unsafe {
                ptr::write(
                    self.ptr.as_ptr().add(i + 1),
                    ptr::read(self.ptr.as_ptr().add(i)),
                );
            };
        }
    }

    /// Moves `[from, length)` one slot toward the head, first element first.
    fn shift_left(&mut self, from: usize) {
        for i in from..self.length {
            unsafe {
                ptr::write(
                    self.ptr.as_ptr().add(i - 1),
                    ptr::read(self.ptr.as_ptr().add(i)),
                );
            };
        }
    }
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

impl<T: Clone, const FLOOR: usize> Clone for Vector<T, FLOOR> {
    /// Deep copy into a fresh buffer of the same capacity.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity);
        for value in self {
            copy.push_back(value.clone());
        }
        copy
    }

    /// Copy-and-swap: the copy of `source` is complete before `self` changes.
    fn clone_from(&mut self, source: &Self) {
        self.assign(source.clone());
    }
}

impl<T, const FLOOR: usize> Drop for Vector<T, FLOOR> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.length));
            dealloc(self.ptr.as_ptr().cast(), Self::layout(self.capacity));
        }
    }
}

impl<T, const FLOOR: usize> Index<usize> for Vector<T, FLOOR> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const FLOOR: usize> IndexMut<usize> for Vector<T, FLOOR> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PartialEq, const A: usize, const B: usize> PartialEq<Vector<T, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const FLOOR: usize> Eq for Vector<T, FLOOR> {}

impl<T: fmt::Debug, const FLOOR: usize> fmt::Debug for Vector<T, FLOOR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Display, const FLOOR: usize> Display for Vector<T, FLOOR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<T, const FLOOR: usize> FromIterator<T> for Vector<T, FLOOR> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut vector = Self::with_capacity(lower);
        for item in iter {
            vector.push_back(item);
        }
        vector
    }
}

impl<T, const FLOOR: usize> Extend<T> for Vector<T, FLOOR> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize, const FLOOR: usize> From<[T; N]> for Vector<T, FLOOR> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const FLOOR: usize> IntoIterator for Vector<T, FLOOR> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        IntoIter {
            ptr: this.ptr,
            layout: Self::layout(this.capacity),
            start: 0,
            end: this.length,
        }
    }
}

impl<'a, T, const FLOOR: usize> IntoIterator for &'a Vector<T, FLOOR> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const FLOOR: usize> IntoIterator for &'a mut Vector<T, FLOOR> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Builds a [`Vector`] with the default growth floor.
///
/// ```
/// use dynarray::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v.size(), 3);
/// assert_eq!(v.capacity(), 5);
///
/// let zeros = vector![0u8; 8];
/// assert_eq!(zeros.capacity(), 8);
/// ```
#[macro_export]
macro_rules! vector {
    () => {{
        let vector: $crate::Vector<_> = $crate::Vector::new();
        vector
    }};

    ($($elem:expr),+ $(,)?) => {{
        let vector: $crate::Vector<_> = $crate::Vector::from([$($elem),+]);
        vector
    }};

    ($elem:expr; $count:expr) => {{
        let vector: $crate::Vector<_> = $crate::Vector::repeating($elem, $count);
        vector
    }};
}

#[cfg(test)]
mod tests {
    use alloc::{
        format,
        string::{String, ToString},
        vec::Vec,
    };

    use pretty_assertions::assert_eq;

    use crate::{Vector, VectorError};

    #[test]
    fn test_default_vector() {
        log_prelude!();
        let v: Vector<i32> = Vector::default();
        assert_eq!(v.size(), 0);
        assert_eq!(v.capacity(), 5);
        assert!(v.is_empty());
    }

    #[test]
    fn test_requested_capacity_respects_floor() {
        let v: Vector<i32> = Vector::with_capacity(0);
        assert_eq!(v.capacity(), 5);
        let v: Vector<i32> = Vector::with_capacity(12);
        assert_eq!(v.capacity(), 12);
        let v: Vector<i32, 2> = Vector::with_capacity(0);
        assert_eq!(v.capacity(), 2);
        assert_eq!(Vector::<i32, 2>::MIN_CAPACITY, 2);
    }

    #[test]
    fn test_literal_sequence() {
        let v = vector![1, 2, 3];
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert_eq!(v.capacity(), 5);

        let v = vector![1, 2, 3, 4, 5, 6, 7];
        assert_eq!(v.size(), 7);
        assert_eq!(v.capacity(), 7);
    }

    #[test]
    fn test_macro_repeat() {
        let v = vector![7; 4];
        assert_eq!(v.size(), 4);
        for i in 0..4 {
            assert_eq!(v[i], 7);
        }

        let empty: Vector<u8> = vector![];
        assert!(empty.is_empty());
    }

    #[test]
    fn test_push_back_and_indexing() {
        log_prelude!();
        let mut v: Vector<i32> = Vector::new();
        v.push_back(10);
        v.push_back(20);
        v.push_back(30);
        assert_eq!(v.size(), 3);
        assert_eq!(v[0], 10);
        assert_eq!(v[1], 20);
        assert_eq!(v[2], 30);

        v[1] = 25;
        *v.get_mut(2).unwrap() += 5;
        assert_eq!(v.as_slice(), &[10, 25, 35]);
    }

    #[test]
    fn test_growth_doubles_size() {
        log_prelude!();
        let mut v: Vector<usize> = Vector::new();
        for i in 0..5 {
            v.push_back(i);
        }
        assert_eq!(v.capacity(), 5);

        v.push_back(5);
        assert_eq!(v.capacity(), 10);
        for i in 6..10 {
            v.push_back(i);
        }
        assert_eq!(v.capacity(), 10);
        v.push_back(10);
        assert_eq!(v.capacity(), 20);

        let expected: Vec<usize> = (0..=10).collect();
        assert_eq!(v.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_get_errors() {
        let empty: Vector<i32> = Vector::new();
        assert_eq!(empty.get(0), Err(VectorError::Empty { operation: "get" }));

        let mut v = vector![1, 2];
        assert_eq!(
            v.get(2),
            Err(VectorError::IndexOutOfRange { index: 2, size: 2 })
        );
        assert_eq!(
            v.get_mut(9),
            Err(VectorError::IndexOutOfRange { index: 9, size: 2 })
        );
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    #[should_panic = "index 3 out of range for vector of size 3"]
    fn test_index_out_of_range_panics() {
        let v = vector![1, 2, 3];
        let _value = v[3];
    }

    #[test]
    #[should_panic = "get: vector is empty"]
    fn test_index_empty_panics() {
        let v: Vector<i32> = Vector::new();
        let _value = v[0];
    }

    #[test]
    fn test_pop_back() {
        let mut v = vector![1, 2, 3];
        let capacity = v.capacity();
        assert_eq!(v.pop_back(), Ok(3));
        assert_eq!(v.pop_back(), Ok(2));
        assert_eq!(v.pop_back(), Ok(1));
        assert_eq!(
            v.pop_back(),
            Err(VectorError::Empty {
                operation: "pop_back"
            })
        );
        assert_eq!(v.capacity(), capacity);
    }

    #[test]
    fn test_front_back() {
        let v = vector![5, 10, 15];
        assert_eq!(v.front(), Some(&5));
        assert_eq!(v.back(), Some(&15));

        let empty: Vector<i32> = Vector::new();
        assert_eq!(empty.front(), None);
        assert_eq!(empty.back(), None);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut v: Vector<i32> = (0..20).collect();
        let capacity = v.capacity();
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.capacity(), capacity);

        v.push_back(10);
        assert_eq!(v[0], 10);
    }

    #[test]
    fn test_reserve() {
        let mut v = vector![1, 2, 3];
        v.reserve(4);
        assert_eq!(v.capacity(), 5);

        v.reserve(100);
        assert_eq!(v.capacity(), 100);
        assert_eq!(v.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_shrink_to_fit() {
        log_prelude!();
        let mut v: Vector<i32> = Vector::with_capacity(40);
        assert_eq!(v.shrink_to_fit(), Err(VectorError::ShrinkEmpty));
        assert_eq!(v.capacity(), 40);

        v.extend(0..12);
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 12);
        assert_eq!(v.size(), 12);

        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 12);

        let expected: Vec<i32> = (0..12).collect();
        assert_eq!(v.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_shrink_stops_at_floor() {
        let mut v: Vector<i32> = Vector::with_capacity(40);
        v.extend([1, 2]);
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 5);
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_insert_shifts_tail() {
        let mut v = vector![1, 2, 4];
        let position = v.insert(v.begin() + 2, 3).unwrap();
        assert_eq!(position.offset(), 2);
        assert_eq!(v.as_slice(), &[1, 2, 3, 4]);

        v.insert(v.begin(), 0).unwrap();
        v.insert(v.end(), 5).unwrap();
        assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insert_grows_full_vector() {
        let mut v: Vector<i32, 3> = Vector::from([1, 2, 3]);
        assert_eq!(v.capacity(), 3);
        let position = v.insert(v.begin() + 1, 9).unwrap();
        assert_eq!(v.capacity(), 6);
        assert_eq!(v.at(position), Ok(&9));
        assert_eq!(v.as_slice(), &[1, 9, 2, 3]);
    }

    #[test]
    fn test_insert_out_of_range_leaves_vector_untouched() {
        let mut v = vector![1, 2, 3];
        let capacity = v.capacity();
        assert_eq!(
            v.insert(v.end() + 1, 4),
            Err(VectorError::PositionOutOfRange {
                offset: 4,
                limit: 4
            })
        );
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert_eq!(v.capacity(), capacity);
    }

    #[test]
    fn test_erase() {
        let mut v = vector![10, 20, 30, 40];
        let next = v.erase(v.begin() + 1).unwrap();
        assert_eq!(v.at(next), Ok(&30));
        assert_eq!(v.as_slice(), &[10, 30, 40]);

        let next = v.erase(v.begin() + 2).unwrap();
        assert_eq!(next, v.end());
        assert_eq!(v.as_slice(), &[10, 30]);
    }

    #[test]
    fn test_erase_end_is_rejected() {
        let mut v = vector![1, 2];
        assert_eq!(
            v.erase(v.end()),
            Err(VectorError::PositionOutOfRange {
                offset: 2,
                limit: 2
            })
        );

        let mut empty: Vector<i32> = Vector::new();
        assert!(empty.erase(empty.begin()).is_err());
    }

    #[test]
    fn test_stale_position_is_rejected() {
        log_prelude!();
        let mut v = vector![1, 2, 3];
        let stale = v.begin() + 1;
        v.insert(v.begin(), 0).unwrap();

        assert!(matches!(
            v.at(stale),
            Err(VectorError::StalePosition { .. })
        ));
        assert!(matches!(
            v.erase(stale),
            Err(VectorError::StalePosition { .. })
        ));
        assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_growth_invalidates_positions() {
        let mut v: Vector<i32, 2> = Vector::from([1, 2]);
        let before = v.begin();
        v.push_back(3);
        assert!(v.at(before).is_err());
        assert_eq!(v.at(v.begin()), Ok(&1));
    }

    #[test]
    fn test_push_without_growth_keeps_positions() {
        let mut v = vector![1, 2];
        let first = v.begin();
        v.push_back(3);
        assert_eq!(v.at(first), Ok(&1));
    }

    #[test]
    fn test_foreign_position_is_rejected() {
        let a = vector![1, 2, 3];
        let mut b = vector![4, 5, 6];
        assert_eq!(b.at(a.begin()), Err(VectorError::ForeignPosition));
        assert_eq!(b.insert(a.begin(), 0), Err(VectorError::ForeignPosition));
        assert_eq!(b.as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn test_at_mut_writes_through() {
        let mut v = vector![1, 2, 3];
        let mut position = v.begin_mut();
        while position != v.end() {
            *v.at_mut(position).unwrap() *= 10;
            position.advance();
        }
        assert_eq!(v.as_slice(), &[10, 20, 30]);
        let end = v.end_mut();
        assert!(v.at_mut(end).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a: Vector<String> = ["x", "y"].iter().map(ToString::to_string).collect();
        a.reserve(9);
        let b = a.clone();
        assert_eq!(b.capacity(), 9);

        a.push_back("z".to_string());
        a[0].push('!');
        assert_eq!(b.size(), 2);
        assert_eq!(b.as_slice(), &["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_clone_from_and_assign() {
        let source = vector![1, 2, 3];
        let mut target: Vector<i32> = (0..50).collect();
        let old = target.begin();

        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.capacity(), source.capacity());
        assert!(target.at(old).is_err());

        target.assign(vector![9]);
        assert_eq!(target.as_slice(), &[9]);
        assert_eq!(source.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_swap() {
        let mut a = vector![1, 2];
        let mut b: Vector<i32> = (0..8).collect();
        let from_b = b.begin();
        a.swap(&mut b);
        assert_eq!(a.size(), 8);
        assert_eq!(b.as_slice(), &[1, 2]);
        assert!(a.at(from_b).is_err());
    }

    #[test]
    fn test_iteration() {
        let mut v = vector![1, 2, 3, 4];
        let sum: i32 = v.iter().sum();
        assert_eq!(sum, 10);

        for value in &mut v {
            *value += 1;
        }
        let collected: Vec<i32> = (&v).into_iter().copied().collect();
        assert_eq!(collected, [2, 3, 4, 5]);
    }

    #[test]
    fn test_print_and_display() {
        let mut out = String::new();
        vector![1, 2, 3].print(&mut out).unwrap();
        assert_eq!(out, "[1, 2, 3]");

        let empty: Vector<i32> = Vector::new();
        assert_eq!(format!("{empty}"), "[]");
        assert_eq!(format!("{}", vector!["a"]), "[a]");
        assert_eq!(format!("{:?}", vector!["a", "b"]), r#"["a", "b"]"#);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_write_to_io_sink() {
        let mut out: Vec<u8> = Vec::new();
        vector![4, 5].write_to(&mut out).unwrap();
        assert_eq!(out, b"[4, 5]");
    }

    #[test]
    fn test_equality_ignores_capacity_and_floor() {
        let a: Vector<i32> = Vector::from([1, 2]);
        let mut b: Vector<i32, 1> = Vector::from([1, 2]);
        b.reserve(30);
        assert!(a == b);
        b.push_back(3);
        assert!(a != b);
    }
}
