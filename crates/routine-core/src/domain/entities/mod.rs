//! Domain entities.

mod company;
mod employee;

pub use company::Company;
pub use employee::Employee;
