// Lectern: syllabus-driven study plans and topic quizzes
//
// This is the library root. Each module corresponds to a major subsystem:
// topic extraction from uploaded syllabi, the SQLite-backed stores, the
// filesystem blob store for uploads, quiz grading, and the web frontend.

pub mod config;
pub mod db;
pub mod extract;
pub mod quiz;
pub mod status;
pub mod storage;
pub mod web;
