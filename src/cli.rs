//! Command line input handling

use inplace_timsort::algorithms::policy;

/// Command line arguments
#[derive(clap::Parser)]
#[command(author, version, about)]
pub struct Args {
    /// The data type to use for sorting
    #[arg()]
    pub data: DataType,
    /// The merge policy of the in-place timsort
    #[arg(short, long, default_value_t = PolicyKind::Default)]
    pub policy: PolicyKind,
    /// The container holding the data while sorting
    #[arg(short, long, default_value_t = ContainerKind::Vector)]
    pub container: ContainerKind,
    /// The number of runs to do
    #[arg(short, long, default_value_t = 100)]
    pub runs: usize,
    /// The size of the slices to sort
    #[arg(short, long, default_value_t = 1_000_000)]
    pub size: usize,
    /// Sort concatenated presorted runs of this length instead of random data
    #[arg(short = 'l', long)]
    pub run_length: Option<usize>,
    /// Seed for the rng
    #[arg(long)]
    pub seed: Option<u64>,
    /// The output file to write the samples to
    pub output: Option<std::path::PathBuf>,
}

/// Available merge policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    /// Runs of at least 48 elements, galloping after 7 wins
    Default,
    /// The rules of the classic timsort
    Classic,
    /// Runs derived from the bit pattern of the size, galloping after 32 wins
    PopCount,
    /// Early merges, galloping after every win
    Eager,
    /// Every decision inverted
    Inverted,
}

impl PolicyKind {
    /// The policy object
    pub fn policy(self) -> Box<dyn policy::MergePolicy> {
        match self {
            PolicyKind::Default => Box::new(policy::DefaultPolicy),
            PolicyKind::Classic => Box::new(policy::ClassicPolicy),
            PolicyKind::PopCount => Box::new(policy::PopCountPolicy),
            PolicyKind::Eager => Box::new(policy::EagerPolicy),
            PolicyKind::Inverted => Box::new(policy::InvertedPolicy),
        }
    }
}

/// Available containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContainerKind {
    /// A fixed size boxed slice
    Array,
    /// A growable vector
    Vector,
}

/// Available data types for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DataType {
    /// Uniformly distributed `u32`
    UniformU32,
    /// Uniformly distributed `u64`
    UniformU64,
    /// Normally distributed `f64`
    NormalF64,
    /// Random alphanumeric strings
    Strings,
    /// Points in space, ordered by their distance to a fixed pivot
    Points,
}

/// Write the name of a value the way it is given on the command line
fn write_value_name<E: clap::ValueEnum>(
    value: &E,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    match value.to_possible_value() {
        Some(possible_value) => f.write_str(possible_value.get_name()),
        None => Ok(()),
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_value_name(self, f)
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_value_name(self, f)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_value_name(self, f)
    }
}
