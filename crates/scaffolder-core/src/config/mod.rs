//! Runtime configuration

pub mod source;

pub use source::{find_install_dir, resolve_template_dir};
