//! CLI command implementations

pub mod describe;
pub mod entities;
pub mod generate;

pub use describe::DescribeCommand;
pub use entities::EntitiesCommand;
pub use generate::GenerateCommand;
