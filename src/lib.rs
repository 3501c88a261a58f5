pub mod annotation;
pub mod input;
pub mod logging;
pub mod model;
pub mod report;
pub mod review;
pub mod schema;
