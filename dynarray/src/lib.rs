//! A contiguous, growable array with checked access and generation-checked
//! positions.
//!
//! ```
//! use dynarray::{vector, Vector, VectorError};
//!
//! let mut v = vector![10, 20, 30];
//! v.push_back(40);
//! let inserted = v.insert(v.begin() + 1, 99)?;
//! assert_eq!(*v.at(inserted)?, 99);
//! assert_eq!(v.to_string(), "[10, 99, 20, 30, 40]");
//!
//! v.erase(v.begin() + 1)?;
//! assert_eq!(v, vector![10, 20, 30, 40]);
//!
//! let mut empty: Vector<i32> = Vector::new();
//! assert_eq!(empty.pop_back(), Err(VectorError::Empty { operation: "pop_back" }));
//! # Ok::<(), VectorError>(())
//! ```
#![no_std]
#![warn(clippy::nursery, clippy::pedantic, clippy::all)]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(test)]
macro_rules! log_prelude {
    () => {
        let _ = simple_logger::SimpleLogger::new()
            .without_timestamps()
            .with_level(log::LevelFilter::Trace)
            .init();
    };
}

pub mod collections;
pub mod errors;

pub use collections::vector::{
    Access, Cursor, DEFAULT_FLOOR, IntoIter, Mutable, Position, PositionMut, ReadOnly, Vector,
};
pub use errors::{Result, VectorError};
