//! Front and back page composition.

mod composer;
pub mod layout;

pub use composer::{LogoStatus, PageComposer};
