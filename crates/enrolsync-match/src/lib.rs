//! Matching engine: correlates timetable entries with catalogue modules.
//!
//! The pipeline here is purely in-memory: classify timetable
//! identifiers into the campus tree, index modules by shortname, then
//! correlate the two through extracted course codes.

#![deny(unsafe_code)]

pub mod classify;
pub mod extract;
pub mod index;
pub mod mapping;
pub mod tree;

pub use classify::{
    campus_of_timetable_id, module_campuses, module_stream, stream_label_of_timetable_id,
    stream_of_timetable_id,
};
pub use extract::extract_codes;
pub use index::ModuleIndex;
pub use mapping::generate_mapping;
pub use tree::build_campus_tree;
