//! Infrastructure services

mod goodbye_classifier;

pub use goodbye_classifier::GoodbyeClassifier;
