//! `hashctl` — command-line interface for the accelerator control link.
//!
//! ```text
//! USAGE:
//!   hashctl encode-write <addr> <value>   Build a write frame (hex out)
//!   hashctl encode-read <addr>            Build a read-select frame
//!   hashctl decode <frame-hex>            Pick a 38-bit frame apart
//!   hashctl session                       Run a scripted simulated session
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use hashctl_chip::frame;
use hashctl_link::{host, Controller, CoreInput, FreqConfig, LinkError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hashctl", about = "Hashing-accelerator control-link CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build a checksummed write frame.
    EncodeWrite {
        /// Register address, 0..=15 (hex accepted with 0x prefix).
        addr: String,
        /// 32-bit payload (hex accepted with 0x prefix).
        value: String,
    },
    /// Build a checksummed read-select frame.
    EncodeRead {
        /// Register address, 0..=15.
        addr: String,
    },
    /// Decode a 38-bit frame and report both parities.
    Decode {
        /// Frame as hex, with or without 0x prefix.
        frame: String,
    },
    /// Run a scripted session against the simulated device.
    Session {
        /// Reference frequency in MHz.
        #[arg(long, default_value_t = 100)]
        reference: u32,
        /// Maximum core frequency in MHz.
        #[arg(long, default_value_t = 400)]
        max: u32,
        /// Initial core frequency in MHz.
        #[arg(long, default_value_t = 200)]
        initial: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::EncodeWrite { addr, value } => cmd_encode_write(&addr, &value)?,
        Cmd::EncodeRead { addr } => cmd_encode_read(&addr)?,
        Cmd::Decode { frame } => cmd_decode(&frame)?,
        Cmd::Session { reference, max, initial } => cmd_session(reference, max, initial)?,
    }

    Ok(())
}

fn parse_u32(s: &str) -> hashctl_link::Result<u32> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| LinkError::malformed_frame(format!("bad value {s:?}")))
}

fn parse_addr(s: &str) -> hashctl_link::Result<u8> {
    let v = parse_u32(s)?;
    if v > 0xF {
        return Err(LinkError::malformed_frame(format!(
            "address {v:#x} out of range (0..=15)"
        )));
    }
    Ok(v as u8)
}

fn parse_frame(s: &str) -> hashctl_link::Result<u64> {
    let s = s.trim();
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let f = u64::from_str_radix(hex, 16)
        .map_err(|_| LinkError::malformed_frame(format!("bad frame {s:?}")))?;
    if f > frame::FRAME_MASK {
        return Err(LinkError::malformed_frame(format!(
            "frame wider than 38 bits: {f:#x}"
        )));
    }
    Ok(f)
}

fn cmd_encode_write(addr: &str, value: &str) -> Result<()> {
    let f = frame::encode_write(parse_addr(addr)?, parse_u32(value)?);
    println!("{f:#012x}");
    Ok(())
}

fn cmd_encode_read(addr: &str) -> Result<()> {
    let f = frame::encode_read(parse_addr(addr)?);
    println!("{f:#012x}");
    Ok(())
}

fn cmd_decode(input: &str) -> Result<()> {
    let f = parse_frame(input)?;

    println!("checksum bit : {}", u8::from(frame::checksum_bit(f)));
    println!("write flag   : {}", u8::from(frame::is_write(f)));
    println!("address      : {:#03x}", frame::address(f));
    println!("payload      : {:#010x}", frame::payload(f));
    println!(
        "full parity  : {}",
        if frame::full_parity(f) { "valid (write accepted)" } else { "invalid" }
    );
    println!(
        "read parity  : {}",
        if frame::partial_parity(f) { "valid (read accepted)" } else { "invalid" }
    );
    Ok(())
}

fn cmd_session(reference: u32, max: u32, initial: u32) -> Result<()> {
    let cfg = FreqConfig::new(reference, max, initial)?;
    let mut ctl = Controller::new(cfg);

    println!("version      : {:#010x}", host::read_reg(&mut ctl, 0x0));

    for addr in 0x1..=0xA_u8 {
        host::write_reg(&mut ctl, addr, 0x0101_0101 * u32::from(addr));
    }
    host::write_reg(&mut ctl, 0xB, 0x1A2B_3C4D);
    println!("job committed (data[2] = 0x1a2b3c4d)");

    for _ in 0..8 {
        let out = ctl.tick_core(CoreInput::idle());
        if out.new_job {
            println!("core picked up job, data[2] = {:#010x}", out.job.data[2]);
        }
    }

    let target = max.min(initial + 100);
    host::write_reg(&mut ctl, 0xD, target);
    let mut steps = 0;
    loop {
        ctl.tick_clock(true);
        steps += 1;
        if ctl.sequencer_idle() {
            break;
        }
    }
    println!(
        "retuned to {target} MHz in {steps} sequencer ticks, multiplier {}",
        ctl.applied_multiplier()
    );

    ctl.tick_core(CoreInput::result(0x600D_BEEF));
    println!("result       : {:#010x}", host::read_reg(&mut ctl, 0xE));
    println!("result again : {:#010x} (drained)", host::read_reg(&mut ctl, 0xE));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_decimal_inputs_parse() {
        assert_eq!(parse_u32("0xff").unwrap(), 255);
        assert_eq!(parse_u32("255").unwrap(), 255);
        assert_eq!(parse_addr("0xB").unwrap(), 0xB);
        assert_eq!(parse_frame("0x1f00000000").unwrap(), 0x1F_0000_0000);
        assert_eq!(parse_frame("1f00000000").unwrap(), 0x1F_0000_0000);
    }

    #[test]
    fn bad_frame_input_is_a_malformed_frame_error() {
        assert!(matches!(
            parse_u32("zzz"),
            Err(LinkError::MalformedFrame { .. })
        ));
        assert!(matches!(
            parse_addr("0x10"),
            Err(LinkError::MalformedFrame { .. })
        ));
        assert!(matches!(
            parse_frame("not hex"),
            Err(LinkError::MalformedFrame { .. })
        ));
        // 44 bits — wider than any legal frame
        assert!(matches!(
            parse_frame("0xFFFFFFFFFFF"),
            Err(LinkError::MalformedFrame { .. })
        ));
    }
}
