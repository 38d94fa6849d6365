//! Built-in alumni activity dataset.
//!
//! Nine timestamped posts with their labels. Used as the default training
//! corpus and default post list when no dataset files are supplied, and as a
//! fixture across the workspace's tests.

use crate::types::{CategoryLabel, Post, TrainingExample};

const SAMPLE: [(&str, &str, CategoryLabel); 9] = [
    (
        "Completed C++ certification offered by XYZ Institute",
        "2021-01-15",
        CategoryLabel::Certification,
    ),
    (
        "Learned Data Structures and Algorithms from ABC University",
        "2021-06-20",
        CategoryLabel::Course,
    ),
    (
        "Built web apps using JavaScript and React",
        "2021-09-10",
        CategoryLabel::Project,
    ),
    (
        "Completed Machine Learning certification at Coursera",
        "2022-03-05",
        CategoryLabel::Certification,
    ),
    (
        "Started Python programming course provided by Udemy",
        "2022-07-22",
        CategoryLabel::Course,
    ),
    (
        "Built an Android app for restaurant management",
        "2022-11-15",
        CategoryLabel::Project,
    ),
    (
        "Completed Web Development bootcamp at CodeAcademy",
        "2023-02-18",
        CategoryLabel::Certification,
    ),
    (
        "Enrolled in Data Science course offered by DataCamp",
        "2023-06-01",
        CategoryLabel::Course,
    ),
    (
        "Completed Cybersecurity certification at Cybrary",
        "2023-09-12",
        CategoryLabel::Certification,
    ),
];

/// The sample posts as labeled training examples.
pub fn training_examples() -> Vec<TrainingExample> {
    SAMPLE
        .iter()
        .map(|(text, _, label)| TrainingExample::new(*text, *label))
        .collect()
}

/// The sample posts with their timestamps, unlabeled.
pub fn posts() -> Vec<Post> {
    SAMPLE
        .iter()
        .map(|(text, timestamp, _)| Post::new(*text, *timestamp))
        .collect()
}
