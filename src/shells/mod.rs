//! Front-ends. Each one normalizes input, calls a
//! [`Classifier`](crate::classifier::Classifier), and renders the
//! [`Presentation`](crate::presentation::Presentation).

pub mod desktop;
pub mod web;
