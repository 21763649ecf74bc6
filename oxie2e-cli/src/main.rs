//! OxiE2E CLI - The Oxidized Protector
//!
//! A Pure Rust tool for AUTOSAR E2E frame protection: protect and check
//! frames with Profiles 1, 2, 4, 5, 6 and 7, or compute the raw CRCs.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{FrameArgs, cmd_check, cmd_crc, cmd_protect, parse_int};
use oxie2e_profiles::DataIdMode;

#[derive(Parser)]
#[command(name = "oxie2e")]
#[command(
    author,
    version,
    about = "The Oxidized Protector - AUTOSAR E2E frame protection"
)]
#[command(long_about = "
OxiE2E is a Pure Rust implementation of AUTOSAR E2E communication
protection. Frames are passed as hex strings and printed back as hex.

Examples:
  oxie2e crc crc32-p4 313233343536373839
  oxie2e protect p04 00000000000000000000000000000000 --length 16 --data-id 0xDEADBEEF
  oxie2e check p04 <protected-frame-hex> --length 16 --data-id 0xDEADBEEF
  oxie2e protect p02 00000000000000000000 --length 9 --data-id-list 000102030405060708090a0b0c0d0e0f
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a CRC over hex input
    Crc {
        /// CRC variant
        #[arg(value_enum)]
        variant: CrcVariant,

        /// Input data as a hex string
        data: String,
    },

    /// Protect a frame in place and print the result
    #[command(alias = "p")]
    Protect {
        /// E2E profile
        #[arg(value_enum)]
        profile: Profile,

        /// Frame as a hex string
        frame: String,

        /// Number of data bytes covered by the CRC
        #[arg(short, long)]
        length: usize,

        /// DataID (decimal or 0x-prefixed hex)
        #[arg(short, long, value_parser = parse_int)]
        data_id: Option<u64>,

        /// 16-byte DataID list as hex (Profile 2 only)
        #[arg(long)]
        data_id_list: Option<String>,

        /// Byte offset of the E2E header (Profiles 4-7)
        #[arg(short, long, default_value = "0")]
        offset: usize,

        /// DataID inclusion mode (Profile 1 only)
        #[arg(short = 'm', long, value_enum, default_value = "both")]
        data_id_mode: DataIdModeArg,

        /// Leave the alive counter untouched
        #[arg(long)]
        no_increment: bool,
    },

    /// Verify a protected frame
    #[command(alias = "c")]
    Check {
        /// E2E profile
        #[arg(value_enum)]
        profile: Profile,

        /// Frame as a hex string
        frame: String,

        /// Number of data bytes covered by the CRC
        #[arg(short, long)]
        length: usize,

        /// DataID (decimal or 0x-prefixed hex)
        #[arg(short, long, value_parser = parse_int)]
        data_id: Option<u64>,

        /// 16-byte DataID list as hex (Profile 2 only)
        #[arg(long)]
        data_id_list: Option<String>,

        /// Byte offset of the E2E header (Profiles 4-7)
        #[arg(short, long, default_value = "0")]
        offset: usize,

        /// DataID inclusion mode (Profile 1 only)
        #[arg(short = 'm', long, value_enum, default_value = "both")]
        data_id_mode: DataIdModeArg,
    },
}

/// CRC variant (for clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CrcVariant {
    /// CRC-8 SAE J1850
    Crc8,
    /// CRC-8 H2F (0x2F polynomial)
    Crc8H2f,
    /// CRC-16 CCITT-FALSE
    Crc16,
    /// CRC-16/ARC
    Crc16Arc,
    /// CRC-32 ISO 3309
    Crc32,
    /// CRC-32 P4 (AUTOSAR)
    Crc32P4,
    /// CRC-64 ECMA/XZ
    Crc64,
}

/// E2E profile (for clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Profile 1 (CRC-8)
    P01,
    /// Profile 2 (CRC-8 H2F, DataID list)
    P02,
    /// Profile 4 (CRC-32 P4)
    P04,
    /// Profile 5 (CRC-16, little-endian CRC)
    P05,
    /// Profile 6 (CRC-16, length field)
    P06,
    /// Profile 7 (CRC-64)
    P07,
}

/// Profile 1 DataID inclusion mode (for clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum DataIdModeArg {
    /// Feed both DataID bytes
    #[default]
    Both,
    /// Alternate bytes by counter parity
    Alt,
    /// Feed the low byte only
    Low,
    /// Low byte plus transmitted nibble
    Nibble,
}

impl From<DataIdModeArg> for DataIdMode {
    fn from(arg: DataIdModeArg) -> Self {
        match arg {
            DataIdModeArg::Both => DataIdMode::Both,
            DataIdModeArg::Alt => DataIdMode::Alt,
            DataIdModeArg::Low => DataIdMode::Low,
            DataIdModeArg::Nibble => DataIdMode::Nibble,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crc { variant, data } => cmd_crc(variant, &data),
        Commands::Protect {
            profile,
            frame,
            length,
            data_id,
            data_id_list,
            offset,
            data_id_mode,
            no_increment,
        } => {
            let args = FrameArgs {
                profile,
                length,
                data_id,
                data_id_list: data_id_list.as_deref(),
                offset,
                data_id_mode,
            };
            cmd_protect(&args, &frame, !no_increment)
        }
        Commands::Check {
            profile,
            frame,
            length,
            data_id,
            data_id_list,
            offset,
            data_id_mode,
        } => {
            let args = FrameArgs {
                profile,
                length,
                data_id,
                data_id_list: data_id_list.as_deref(),
                offset,
                data_id_mode,
            };
            match cmd_check(&args, &frame) {
                Ok(true) => Ok(()),
                Ok(false) => std::process::exit(1),
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
