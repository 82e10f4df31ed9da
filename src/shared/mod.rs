pub mod constants;
pub mod query;
pub mod serde_helpers;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
