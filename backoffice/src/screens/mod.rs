//! Admin list screens.

pub mod currencies;
pub mod languages;
pub mod roles;

pub use currencies::Currency;
pub use languages::Language;
pub use roles::Role;
