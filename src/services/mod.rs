//! Service layer

pub mod facade;

pub use facade::HbnbFacade;
