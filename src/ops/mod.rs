pub mod check;
pub mod clipboard;
pub mod document;
pub mod drag;
pub mod overrides;
pub mod page_ops;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_fixtures;
