// src/handlers/mod.rs

pub mod exams;
pub mod lessons;
pub mod lessons_completed;
pub mod questions;
pub mod quizlets;
pub mod reset;
pub mod schedules;
pub mod submission_records;
pub mod submissions;
pub mod topics;
pub mod users;
