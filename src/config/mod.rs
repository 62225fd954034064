pub mod loader;
pub mod schema;
#[cfg(test)]
pub(crate) mod test_env;

pub use loader::{ConfigStore, FileConfigStore};
pub use schema::{Configuration, TITLE_SERVICE_KEY_LEN, TitleTemplate};
