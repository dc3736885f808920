//! Output generation modules for digest JSON files and the master index.
//!
//! # Submodules
//!
//! - [`json`]: Writes each [`crate::models::Digest`] to its own JSON file
//! - [`indexes`]: Maintains `index.json`, the master directory of digests
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── daily/
//! │   ├── 26-02-04.json
//! │   └── 26-02-05.json
//! ├── weekly/
//! │   └── 26-5.json
//! ├── monthly/
//! │   └── 26-01.json
//! └── index.json
//! ```

pub mod indexes;
pub mod json;
