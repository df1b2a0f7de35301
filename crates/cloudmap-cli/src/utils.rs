use clap::ValueEnum;
use cloudmap::ExecutionMode;

#[derive(Default, Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum AvailableExecutionMode {
    #[default]
    Multithreaded,
    Monothreaded,
}

impl From<AvailableExecutionMode> for ExecutionMode {
    fn from(val: AvailableExecutionMode) -> Self {
        match val {
            AvailableExecutionMode::Multithreaded => ExecutionMode::Multithreaded,
            AvailableExecutionMode::Monothreaded => ExecutionMode::Monothreaded,
        }
    }
}
