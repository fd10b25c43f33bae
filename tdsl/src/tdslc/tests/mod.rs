#[cfg(feature = "parser")]
mod parser_tests;
mod processor_tests;
