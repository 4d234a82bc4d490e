#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![doc = include_str!("../README.md")]

// Fixes derive macro in tests/doc tests.
#[cfg(test)]
extern crate self as datestamp;

#[macro_use]
mod logging;

pub mod civil;
mod date;
mod error;
mod ext;
mod format;
pub mod layout;
mod value;

pub use crate::date::Date;
pub use crate::error::{ParseError, ScanError, ScanErrorKind, SCAN_FAILED};
pub use crate::format::*;
pub use crate::value::{Scan, SqlValue, Valuer};

#[cfg(feature = "derive")]
pub use datestamp_derive::TimeFormat;

#[cfg(feature = "serde")]
mod serde;

#[cfg(test)]
fn random_data<T>(n: usize) -> Vec<T>
where
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let n = limit_miri(n);
    use rand::prelude::*;
    let mut rng = rand_chacha::ChaCha20Rng::from_seed(Default::default());
    (0..n).map(|_| rng.gen()).collect()
}
#[cfg(test)]
fn limit_miri(n: usize) -> usize {
    if cfg!(miri) {
        (n / 100).clamp(10, 1000)
    } else {
        n
    }
}
