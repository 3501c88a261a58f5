pub mod samples;
pub mod text;

pub use samples::{SampleView, sample_view};
pub use text::{render_fields_text, render_record_text};

#[cfg(test)]
#[path = "../../tests/src_inline/report/tests.rs"]
mod tests;
