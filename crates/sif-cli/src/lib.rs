//! siftool - SIF data object tool
//!
//! Turns user-facing flags into a resolved [`sif_core::DescriptorInput`] and
//! reports it for the container writer.
//!
//! # Example
//!
//! ```text
//! siftool add image.sif recipe.def --datatype 1
//! siftool add image.sif rootfs.squashfs --datatype 4 --parttype 1 --partfs 1 --partarch 2
//! siftool add image.sif signature.bin --datatype 5 --signhash 1 \
//!     --signentity 433FE984155206BD962725E20E8713472A879943
//! ```

pub mod cmd;
pub mod config;

use clap::{Parser, Subcommand};

pub use config::{AddArgs, AddConfig};

/// siftool - resolve SIF data object descriptors
#[derive(Debug, Parser)]
#[command(name = "siftool")]
#[command(author, version, about)]
pub struct Cli {
    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log option handling at debug level unless a log filter is set in the environment
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the descriptor of a data object to add to a SIF image
    Add(AddArgs),
    /// List the architecture codes accepted by --partarch
    Arch,
}
