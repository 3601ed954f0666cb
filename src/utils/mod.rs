#[cfg(test)]
pub mod mock;
pub mod types;
