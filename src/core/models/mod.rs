//! Domain models for the club service

pub mod club;
pub mod event;
pub mod gallery;
pub mod member;
pub mod registration;
pub mod role;

pub use club::*;
pub use event::*;
pub use gallery::*;
pub use member::*;
pub use registration::*;
pub use role::*;
