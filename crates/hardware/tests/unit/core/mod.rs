/// Pipeline tests.
pub mod pipeline;
