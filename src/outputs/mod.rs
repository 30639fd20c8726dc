//! Output generation for loaded articles.
//!
//! # Submodules
//!
//! - [`json`]: Writes a `FeedSnapshot` to a JSON file
//! - [`markdown`]: Renders the article list, or the empty-state message, as Markdown
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── world.json
//!     └── science.json
//! ```

pub mod json;
pub mod markdown;
