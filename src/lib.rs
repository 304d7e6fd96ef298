#[cfg(test)]
#[macro_use]
extern crate approx;
#[macro_use]
extern crate static_assertions;

pub mod authoring;
pub mod config;
pub mod coords;
pub mod error;
pub mod follow_path;
pub mod sample_parser;
pub mod svg_plot;

pub mod curves {
    pub mod linear_path;
}

pub use crate::coords::{Point, Vector};
pub use crate::curves::linear_path::{LinearPath, PointHandle};
pub use crate::error::{Error, Result};

assert_impl_all!(Vector: Copy, Send, Sync);
assert_impl_all!(LinearPath: Clone, Send, Sync);

#[cfg(test)]
mod tests;
