// Command handlers, one module per subcommand

pub mod equation;
pub mod fetch;
pub mod parse;
