use core::{
    fmt,
    marker::PhantomData,
    ops::{Add, AddAssign, Sub},
    ptr::{self, NonNull},
};

mod sealed {
    pub trait Sealed {}
}

/// Capability carried by a [`Cursor`]: either [`Mutable`] or [`ReadOnly`].
pub trait Access: sealed::Sealed {}

/// Marker for positions that dereference to `&mut T`.
#[derive(Debug)]
pub enum Mutable {}

/// Marker for positions that dereference to `&T`.
#[derive(Debug)]
pub enum ReadOnly {}

impl sealed::Sealed for Mutable {}
impl sealed::Sealed for ReadOnly {}
impl Access for Mutable {}
impl Access for ReadOnly {}

/// A read-only position, as returned by [`Vector::begin`](super::Vector::begin).
pub type Position<T> = Cursor<T, ReadOnly>;

/// A mutable position, as returned by [`Vector::begin_mut`](super::Vector::begin_mut),
/// [`Vector::insert`](super::Vector::insert) and [`Vector::erase`](super::Vector::erase).
pub type PositionMut<T> = Cursor<T, Mutable>;

/// A snapshot of an offset into one vector's storage.
///
/// A cursor does not borrow the vector it came from. It records the storage
/// base and the vector's generation at the time it was issued, and the vector
/// refuses it once either has moved on (any reallocation, insert, erase,
/// shrink or clear). Dereference goes through [`Vector::at`](super::Vector::at)
/// and [`Vector::at_mut`](super::Vector::at_mut).
///
/// Two cursors compare equal iff they name the same storage slot, regardless
/// of their access kind.
pub struct Cursor<T, A: Access> {
    base: NonNull<T>,
    offset: usize,
    generation: u64,
    _access: PhantomData<A>,
}

impl<T, A: Access> Cursor<T, A> {
    pub(super) const fn new(base: NonNull<T>, offset: usize, generation: u64) -> Self {
        Self {
            base,
            offset,
            generation,
            _access: PhantomData,
        }
    }

    /// Zero-based slot index this position refers to.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub(super) const fn base(&self) -> NonNull<T> {
        self.base
    }

    pub(super) const fn generation(&self) -> u64 {
        self.generation
    }

    /// Moves to the next slot and returns the advanced position (prefix form).
    pub const fn advance(&mut self) -> &mut Self {
        self.offset += 1;
        self
    }

    /// Moves to the next slot and returns the position as it was before
    /// the move (postfix form).
    #[must_use = "use `advance` if the previous position is not needed"]
    pub const fn post_advance(&mut self) -> Self {
        let previous = *self;
        self.offset += 1;
        previous
    }

    fn slot(&self) -> *const T {
        self.base.as_ptr().wrapping_add(self.offset).cast_const()
    }
}

impl<T, A: Access> Clone for Cursor<T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Access> Copy for Cursor<T, A> {}

impl<T, A: Access, B: Access> PartialEq<Cursor<T, B>> for Cursor<T, A> {
    fn eq(&self, other: &Cursor<T, B>) -> bool {
        ptr::eq(self.slot(), other.slot())
    }
}

impl<T, A: Access> Eq for Cursor<T, A> {}

impl<T, A: Access> fmt::Debug for Cursor<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<T, A: Access> Add<usize> for Cursor<T, A> {
    type Output = Self;

    fn add(mut self, rhs: usize) -> Self {
        self += rhs;
        self
    }
}

impl<T, A: Access> AddAssign<usize> for Cursor<T, A> {
    fn add_assign(&mut self, rhs: usize) {
        self.offset += rhs;
    }
}

/// Signed slot distance between two read-only positions over the same storage.
impl<T> Sub for Cursor<T, ReadOnly> {
    type Output = isize;

    #[allow(clippy::cast_possible_wrap)]
    fn sub(self, rhs: Self) -> isize {
        debug_assert!(
            self.base == rhs.base,
            "subtracting positions over different storage"
        );
        self.offset.wrapping_sub(rhs.offset) as isize
    }
}

impl<T> From<Cursor<T, Mutable>> for Cursor<T, ReadOnly> {
    fn from(position: Cursor<T, Mutable>) -> Self {
        Self::new(position.base, position.offset, position.generation)
    }
}
