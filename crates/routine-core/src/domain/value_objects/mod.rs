//! Value objects.

mod gender;

pub use gender::Gender;
