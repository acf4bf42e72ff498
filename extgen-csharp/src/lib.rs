//! C# host adapter for `extgen-core`.
//!
//! Turns a directory of C# sources into the generated
//! `ExtensionMethods.g.cs` unit:
//!
//! 1. [`fs_scan`] collects `.cs` files, skipping build folders and generated files.
//! 2. [`parse`] outlines each file with tree-sitter (namespaces, types, methods, usings).
//! 3. [`lower`] builds the portable [`extgen_core::SyntaxForest`].
//! 4. [`resolve`] supplies canonical signatures to the pipeline.
//! 5. [`sink`] and [`summary`] write the unit and `summary.json`.
//!
//! [`run::generate_for_project`] drives all of it.

pub mod canonical;
pub mod config;
pub mod fs_scan;
pub mod lower;
pub mod normalize;
pub mod parse;
pub mod resolve;
pub mod run;
pub mod sink;
pub mod summary;

pub use config::model::GeneratorConfig;
pub use resolve::CsharpResolver;
pub use run::{generate_for_project, generate_for_sources};
pub use sink::FileSink;
pub use summary::RunSummary;
