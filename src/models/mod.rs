// src/models/mod.rs

pub mod exam;
pub mod lesson;
pub mod lesson_completed;
pub mod question;
pub mod quizlet;
pub mod schedule;
pub mod submission;
pub mod submission_record;
pub mod topic;
pub mod user;
