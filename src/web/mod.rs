//! HTML front end: page rendering and form submissions

pub mod handlers;
