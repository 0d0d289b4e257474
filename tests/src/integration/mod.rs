//! Cross-subsystem integration tests.

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod flows;
#[cfg(test)]
mod ledger;
